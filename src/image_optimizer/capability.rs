//! Encoder capability providers
//!
//! Whether WebP can be produced is injected into the optimizer instead of
//! being read from the environment inside each call. Production code uses
//! `RuntimeWebPSupport`, which probes the encoder once; callers wanting a
//! fixed answer use `StaticWebPSupport`.

use std::sync::OnceLock;

/// Answers whether WebP encoding is available
#[cfg_attr(test, mockall::automock)]
pub trait WebPSupport: Send + Sync {
    fn supports_webp(&self) -> bool;
}

/// Probes the linked WebP encoder the first time it is asked
#[derive(Debug, Default)]
pub struct RuntimeWebPSupport {
    probed: OnceLock<bool>,
}

impl RuntimeWebPSupport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WebPSupport for RuntimeWebPSupport {
    fn supports_webp(&self) -> bool {
        *self.probed.get_or_init(|| {
            let supported = probe_webp_encoder();
            tracing::debug!(supported, "Probed WebP encoder");
            supported
        })
    }
}

/// Encode a single opaque pixel and check the container header
fn probe_webp_encoder() -> bool {
    let pixel = [0u8, 0, 0, 255];
    match webp::Encoder::from_rgba(&pixel, 1, 1).encode_simple(false, 50.0) {
        Ok(memory) => {
            let data: &[u8] = &memory;
            data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
        }
        Err(_) => false,
    }
}

/// Fixed capability answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticWebPSupport(bool);

impl StaticWebPSupport {
    pub fn new(supported: bool) -> Self {
        Self(supported)
    }
}

impl WebPSupport for StaticWebPSupport {
    fn supports_webp(&self) -> bool {
        self.0
    }
}
