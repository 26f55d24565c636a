// Application layer - Use case interactors

pub mod container;
pub mod download_interactor;
pub mod harvest_interactor;
pub mod listing_interactor;
pub mod worker;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use download_interactor::DownloadInteractor;
pub use harvest_interactor::HarvestInteractor;
pub use listing_interactor::ListingInteractor;
pub use worker::PipelineWorker;
