//! canvas-client: HTTP client library for the discovery daemon
//!
//! # Example
//!
//! ```no_run
//! use canvas_client::DiscoveryClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DiscoveryClient::new("http://localhost:8880")?;
//!
//! let ip = client.primary_load_balancer_ip().await?;
//! println!("primary load balancer: {ip}");
//!
//! let inventory = client.all_instances().await?;
//! for (role, instance) in inventory.iter() {
//!     println!("{role}: {}", instance.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;

pub use error::{ClientError, Result};
pub use http::DiscoveryClient;
