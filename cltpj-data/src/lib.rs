mod loader;

pub use loader::{LoaderError, TablesLoader};
