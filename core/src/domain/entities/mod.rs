//! Domain entities representing core business objects.

pub mod audit;
pub mod clock_event;
pub mod location;
pub mod qr_config;
pub mod qr_token;

// Re-export commonly used types
pub use audit::{AuditAction, AuditEntry, ENTITY_CLOCK_EVENT, ENTITY_LOCATION};
pub use clock_event::{ClockEvent, ClockEventType};
pub use location::{Geofence, Location, DEFAULT_MAX_ACCURACY_METERS};
pub use qr_config::{QrConfig, RotationMode, DEFAULT_TOKEN_TTL_SECONDS};
pub use qr_token::{IssuedQrToken, QrTokenPayload, NONCE_BYTES};
