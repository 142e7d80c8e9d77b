pub mod detail;
pub mod search;
pub mod widget_tree;

pub use detail::{DetailContentInfo, DetailTree, DetailWidgetData};
pub use search::{ContentInfo, SearchTree, SearchWidgetData, HEADER_TRAY_SPACE, RESULTS_SPACE};
pub use widget_tree::{Page, Space, Widget, WidgetTree, WidgetWrapper};
