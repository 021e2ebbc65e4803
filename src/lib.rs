pub mod network;

pub use network::{Network, NetworkError};

pub mod route;

pub use route::Route;

pub mod transfers;

pub use transfers::fewest_transfers;

pub mod fastest;

pub use fastest::{fastest_route, fastest_route_with, SearchPreferences};

pub mod gtfs;

pub use gtfs::GtfsImportOptions;

pub mod utils;
