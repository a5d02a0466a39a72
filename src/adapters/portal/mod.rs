//! Portal adapter. Implements IpProber and the per-carrier LoginStrategy ports.

pub mod eportal;
pub mod http;
pub mod status_page;
pub mod unsupported;

pub use eportal::EportalLogin;
pub use http::PortalHttp;
pub use status_page::PortalIpProber;
pub use unsupported::UnsupportedLogin;

use crate::domain::CarrierKind;
use crate::usecases::CarrierDispatcher;
use std::sync::Arc;

/// Dispatch table for the campus portal: China Mobile via `eportal`, the rest unsupported.
pub fn campus_dispatcher(http: Arc<PortalHttp>) -> CarrierDispatcher {
    CarrierDispatcher::new(
        Arc::new(UnsupportedLogin::new(CarrierKind::TelecomA)),
        Arc::new(EportalLogin::mobile(http)),
        Arc::new(UnsupportedLogin::new(CarrierKind::UnicomC)),
        Arc::new(UnsupportedLogin::new(CarrierKind::CampusD)),
    )
}
