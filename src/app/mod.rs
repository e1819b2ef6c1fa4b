// Application layer - Use case interactors

pub mod container;
pub mod identify_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use identify_interactor::{IdentifyInteractor, IdentifyReport, IdentifyRequest};
