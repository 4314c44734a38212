/// Photo records: payload shapes, repository and sample data
pub mod models;
pub mod repository;
pub mod seed;

pub use models::{NewPhoto, PhotoCreate, PhotoResponse, PhotoUpdate};
pub use repository::PhotoRepository;
