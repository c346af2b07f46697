// UI construction module
//
// Everything needed to turn declarative panel descriptions into scene nodes:
// the icon cache, the primitive node factory, NodeSpec descriptors and the
// idempotent panel builder.

pub mod builder;
pub mod factory;
pub mod icons;
pub mod spec;

pub use builder::{clean_scene, cleanup_orphans, PanelBuilder, PanelHandle};
pub use factory::{ButtonStyle, NodeFactory};
pub use icons::{FsIconSource, IconCache, IconSource};
pub use spec::{NodeSpec, Widget};
