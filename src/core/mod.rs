//! Query form core: wire types, transport, page regions and the submit controller

pub mod controller;
pub mod page;
pub mod payload;
pub mod query_client;
