#[macro_use]
extern crate log;
#[macro_use]
extern crate num_derive;

mod common;
mod error;
mod socks5;

pub use common::addresses::{Destination, ProxyAddress};
pub use common::constants;
pub use common::credentials::Credentials;
pub use error::{Result, Socks5Error};
pub use socks5::{HandshakePhase, Socks5Client, Socks5Reply, Socks5Request};
