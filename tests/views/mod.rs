//! Tests for the variable view system

mod index_translation_tests;
mod remap_tests;
mod shared_layout_tests;
mod view_resolution_tests;
