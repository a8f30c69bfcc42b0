use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use places::Coordinate;
use tracker::{MapSurface, Marker, Notice, NoticeDuration, Notifier};
use walkers::Position;

const SHORT_NOTICE: Duration = Duration::from_millis(2000);
const LONG_NOTICE: Duration = Duration::from_millis(3500);

pub fn to_position(coordinate: Coordinate) -> Position {
    Position::from_lat_lon(coordinate.latitude, coordinate.longitude)
}

/// What the map is showing: the annotation layer and the camera.
pub struct MapScene {
    pub markers: Vec<Marker>,
    pub camera_center: Position,
    /// Degrees clockwise from north.
    pub camera_bearing: f64,
    pub focal_point: Option<Position>,
}

impl MapScene {
    pub fn new(initial_center: Coordinate) -> Self {
        Self {
            markers: vec![],
            camera_center: to_position(initial_center),
            camera_bearing: 0.0,
            focal_point: None,
        }
    }
}

/// Handle to the scene shared between the screen controller and the map widget.
#[derive(Clone)]
pub struct SharedScene(pub Rc<RefCell<MapScene>>);

impl SharedScene {
    pub fn new(initial_center: Coordinate) -> Self {
        Self(Rc::new(RefCell::new(MapScene::new(initial_center))))
    }
}

impl MapSurface for SharedScene {
    fn clear_markers(&mut self) {
        self.0.borrow_mut().markers.clear();
    }

    fn add_marker(&mut self, marker: Marker) {
        self.0.borrow_mut().markers.push(marker);
    }

    fn set_camera_center(&mut self, center: Coordinate) {
        self.0.borrow_mut().camera_center = to_position(center);
    }

    fn set_camera_bearing(&mut self, bearing: f64) {
        self.0.borrow_mut().camera_bearing = bearing;
    }

    fn set_focal_point(&mut self, focal_point: Coordinate) {
        self.0.borrow_mut().focal_point = Some(to_position(focal_point));
    }
}

/// Tracks the place picked on the map or in the list.
#[derive(Default)]
pub struct SelectionState {
    pub place: Option<String>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self { place: None }
    }

    /// If the provided place is already selected, it will be deselected.
    /// Otherwise, it will be selected.
    pub fn toggle_place_selection(&mut self, label: &str) {
        if self.place.as_deref() == Some(label) {
            self.place = None;
        } else {
            self.place = Some(label.to_string());
        }
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.place.as_deref() == Some(label)
    }
}

/// Toasts waiting to expire.
#[derive(Default)]
pub struct NoticeBoard {
    notices: Vec<(Notice, Instant)>,
}

impl NoticeBoard {
    pub fn post(&mut self, notice: Notice, now: Instant) {
        self.notices.push((notice, now));
    }

    /// Drops expired notices and returns the texts still on screen, oldest first.
    pub fn active(&mut self, now: Instant) -> Vec<&'static str> {
        self.notices
            .retain(|(notice, posted)| now.duration_since(*posted) < lifetime(notice.duration()));
        self.notices.iter().map(|(notice, _)| notice.text()).collect()
    }
}

fn lifetime(duration: NoticeDuration) -> Duration {
    match duration {
        NoticeDuration::Short => SHORT_NOTICE,
        NoticeDuration::Long => LONG_NOTICE,
    }
}

#[derive(Clone, Default)]
pub struct SharedNotices(pub Rc<RefCell<NoticeBoard>>);

impl Notifier for SharedNotices {
    fn notify(&mut self, notice: Notice) {
        self.0.borrow_mut().post(notice, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_follows_surface_calls() {
        let mut scene = SharedScene::new(Coordinate::from_lat_lon(0.0, 0.0));
        let park = Coordinate::from_lat_lon(-26.1952, 28.0436);

        scene.set_camera_center(park);
        scene.set_camera_bearing(90.0);
        scene.set_focal_point(park);

        let inner = scene.0.borrow();
        assert_eq!(inner.camera_center, to_position(park));
        assert_eq!(inner.camera_bearing, 90.0);
        assert_eq!(inner.focal_point, Some(to_position(park)));
    }

    #[test]
    fn test_clear_markers_empties_the_layer() {
        let mut scene = SharedScene::new(Coordinate::from_lat_lon(0.0, 0.0));
        scene.add_marker(Marker {
            coordinate: Coordinate::from_lat_lon(-26.1952, 28.0436),
            label: "Park".to_string(),
            text_offset: [0.0, -2.0],
            text_color: "#000000".to_string(),
            text_size: 12.0,
            icon: "place-pin".to_string(),
        });
        assert_eq!(scene.0.borrow().markers.len(), 1);

        scene.clear_markers();
        assert!(scene.0.borrow().markers.is_empty());
    }

    #[test]
    fn test_selection_toggles() {
        let mut selection = SelectionState::new();
        selection.toggle_place_selection("Cafe");
        assert!(selection.is_selected("Cafe"));

        selection.toggle_place_selection("Museum");
        assert!(selection.is_selected("Museum"));

        selection.toggle_place_selection("Museum");
        assert_eq!(selection.place, None);
    }

    #[test]
    fn test_notices_expire_by_duration() {
        let mut board = NoticeBoard::default();
        let posted = Instant::now();
        board.post(Notice::TrackingDismissed, posted);
        board.post(Notice::PermissionDenied, posted);

        assert_eq!(
            board.active(posted + Duration::from_millis(1000)),
            vec![Notice::TrackingDismissed.text(), Notice::PermissionDenied.text()]
        );
        assert_eq!(
            board.active(posted + Duration::from_millis(2500)),
            vec![Notice::PermissionDenied.text()]
        );
        assert!(board.active(posted + Duration::from_millis(4000)).is_empty());
    }
}
