pub mod banner;
pub mod coordinator;
pub mod minimap;
pub mod surfaces;

pub use banner::{nav_visible, InfoBanner};
pub use coordinator::OverlayCoordinator;
pub use minimap::{Minimap, MinimapMarker};
pub use surfaces::{ChatSurface, ContentSurface, ContentTab, ContentView};
