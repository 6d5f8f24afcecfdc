//! Ready-made components for common gameplay chores.
//!
//! | component | does |
//! |---|---|
//! | [`DestroyOnCollision`] | destroys an object when its sphere collider touches something |
//! | [`LinearMoveForward`] | moves its object along its forward axis every fixed update |
//! | [`DontDestroyOnLoad`] | makes its object persistent on start |
//! | [`SceneAutoLoader`] | loads a scene after a delay |
//! | [`PressKeyToQuit`] | requests application quit on a key press |

mod destroy_on_collision;
mod dont_destroy_on_load;
mod linear_move_forward;
mod press_key_to_quit;
mod scene_auto_loader;

pub use destroy_on_collision::DestroyOnCollision;
pub use dont_destroy_on_load::DontDestroyOnLoad;
pub use linear_move_forward::LinearMoveForward;
pub use press_key_to_quit::PressKeyToQuit;
pub use scene_auto_loader::SceneAutoLoader;
