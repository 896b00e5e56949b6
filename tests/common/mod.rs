mod test_server;

#[allow(unused_imports)]
pub use test_server::{TestServer, id_of};
