pub mod config;
pub mod error;
pub mod events;
pub mod gallery;
pub mod probe;
pub mod scan;
pub mod stars;
pub mod tasks {
    pub mod star_mode;
}
