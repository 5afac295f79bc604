pub mod editable_node;
pub mod graph_canvas;
pub mod keyboard;
pub mod toolbar;
