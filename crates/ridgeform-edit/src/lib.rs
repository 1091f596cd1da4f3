pub mod brush;
pub mod camera;
pub mod editor;
pub mod gesture;
pub mod pick;

pub use brush::BrushStroke;
pub use camera::{CameraPose, CameraRig, FlyCamera};
pub use editor::{BrushEditor, EditorState};
pub use gesture::{GestureDetector, GestureEvent};
pub use pick::{MeshRaycaster, PickHit, PickingIndex, SurfaceIntersector, TriangleHit};
