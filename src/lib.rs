// flashback-ui: code-built UI scene graph
//
// Panels are described declaratively, materialized into a generational scene
// graph by an idempotent builder, and driven by small state machines (hover
// menus, settings pages, bounded selection) that talk to manager
// collaborators through weak links.

pub mod action;
pub mod app;
pub mod managers;
pub mod panels;
pub mod scene;
pub mod theme;
pub mod ui;
pub mod view;
