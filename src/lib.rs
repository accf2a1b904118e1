// Library for tests to access modules

pub mod api_client;
pub mod config;
pub mod incidents;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod refresh;
pub mod series;
pub mod summary;
pub mod version;
