use crate::point::Point;

/// Zoom is kept in tenths so repeated steps never drift.
const ZOOM_STEP: u8 = 1;
const MIN_ZOOM: u8 = 5;
const MAX_ZOOM: u8 = 20;
const IDENTITY_ZOOM: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    Idle,
    Dragging,
}

/// Snapshot taken when a drag begins.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    /// Camera position at drag start
    position: Point,

    /// Pointer position at drag start
    pointer: Point,
}

/// Pan and zoom over the board.
///
/// The camera is idle until [`Camera::begin_drag`], and dragging until [`Camera::end_drag`]. While
/// dragging, every pointer move recomputes the position from the snapshot taken at drag start, so
/// the pointer stays over the same point of the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Pan offset, in screen units at scale 1
    position: Point,

    /// Scale in tenths, within `[MIN_ZOOM, MAX_ZOOM]`
    zoom: u8,

    drag: Option<Drag>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub const MIN_SCALE: f64 = MIN_ZOOM as f64 / 10.0;
    pub const MAX_SCALE: f64 = MAX_ZOOM as f64 / 10.0;

    pub const fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            zoom: IDENTITY_ZOOM,
            drag: None,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scale(&self) -> f64 {
        self.zoom as f64 / 10.0
    }

    pub fn state(&self) -> CameraState {
        match self.drag {
            Some(_) => CameraState::Dragging,
            None => CameraState::Idle,
        }
    }

    /// Whether the camera is at position `(0, 0)` with scale `1`.
    pub fn is_identity(&self) -> bool {
        self.position == Point::ORIGIN && self.zoom == IDENTITY_ZOOM
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Start a drag at `pointer`. Starting again while dragging takes a fresh snapshot.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = Some(Drag {
            position: self.position,
            pointer,
        });
    }

    /// Follow the pointer. Does nothing while idle.
    pub fn while_dragging(&mut self, pointer: Point) {
        let Some(drag) = self.drag else { return };

        self.position = drag.position - (drag.pointer - pointer) / self.scale();
    }

    /// Stop dragging. The last computed position is kept.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Back to position `(0, 0)` and scale `1`. An ongoing drag is left running.
    pub fn reset(&mut self) {
        self.position = Point::ORIGIN;
        self.zoom = IDENTITY_ZOOM;
    }

    /// Map a board-space point to the screen: zoom about the center of `viewport`, then pan.
    pub fn to_screen(&self, p: Point, viewport: Point) -> Point {
        let center = Point::ORIGIN.mid(&viewport);

        (p + self.position - center) * self.scale() + center
    }
}

#[cfg(test)]
mod test {
    use super::Camera;
    use super::CameraState;
    use crate::point::Point;

    #[test]
    fn zoom_clamps() {
        let mut cam = Camera::new();

        for _ in 0..20 {
            cam.zoom_in();
        }
        assert_eq!(cam.scale(), 2.0);

        for _ in 0..20 {
            cam.zoom_out();
        }
        assert_eq!(cam.scale(), 0.5);
    }

    #[test]
    fn zoom_round_trip_is_identity() {
        let mut cam = Camera::new();

        cam.zoom_in();
        cam.zoom_in();
        cam.zoom_out();
        cam.zoom_out();

        assert!(cam.is_identity());
    }

    #[test]
    fn drag_at_unit_scale_follows_pointer() {
        let mut cam = Camera::new();

        cam.begin_drag(Point::new(100.0, 100.0));
        assert_eq!(cam.state(), CameraState::Dragging);

        cam.while_dragging(Point::new(130.0, 90.0));
        assert_eq!(cam.position(), Point::new(30.0, -10.0));

        cam.end_drag();
        assert_eq!(cam.state(), CameraState::Idle);
        assert_eq!(cam.position(), Point::new(30.0, -10.0));
    }

    #[test]
    fn drag_is_divided_by_scale() {
        let mut cam = Camera::new();
        for _ in 0..10 {
            cam.zoom_in();
        }

        cam.begin_drag(Point::new(0.0, 0.0));
        cam.while_dragging(Point::new(40.0, -20.0));

        assert_eq!(cam.position(), Point::new(20.0, -10.0));
    }

    #[test]
    fn drag_starts_from_current_position() {
        let mut cam = Camera::new();

        cam.begin_drag(Point::new(0.0, 0.0));
        cam.while_dragging(Point::new(10.0, 10.0));
        cam.end_drag();

        cam.begin_drag(Point::new(50.0, 50.0));
        cam.while_dragging(Point::new(55.0, 45.0));

        assert_eq!(cam.position(), Point::new(15.0, 5.0));
    }

    #[test]
    fn idle_moves_are_ignored() {
        let mut cam = Camera::new();

        cam.while_dragging(Point::new(10.0, 10.0));
        cam.end_drag();

        assert!(cam.is_identity());
    }

    #[test]
    fn reset_restores_identity() {
        let mut cam = Camera::new();
        cam.zoom_out();
        cam.begin_drag(Point::new(0.0, 0.0));
        cam.while_dragging(Point::new(3.0, 4.0));

        cam.reset();

        assert!(cam.is_identity());
    }

    #[test]
    fn to_screen_zooms_about_center() {
        let mut cam = Camera::new();
        let viewport = Point::new(100.0, 100.0);

        assert_eq!(cam.to_screen(Point::new(10.0, 20.0), viewport), Point::new(10.0, 20.0));

        for _ in 0..10 {
            cam.zoom_in();
        }

        assert_eq!(cam.to_screen(Point::new(50.0, 50.0), viewport), Point::new(50.0, 50.0));
        assert_eq!(cam.to_screen(Point::new(60.0, 40.0), viewport), Point::new(70.0, 30.0));
    }
}
