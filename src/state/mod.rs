pub mod scene;
pub mod settings;

pub use scene::SceneLayout;
pub use settings::Settings;
