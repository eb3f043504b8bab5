use compass_dial::{BearingObserver, Canvas, Color, Compass, DialStyle, SensorSample};
use nalgebra::Point2;

const SURFACE_SIZE: f32 = 240.0;

/// Stands in for the host's accessibility service and view invalidation
#[derive(Default)]
struct ConsoleObserver {
    dirty: bool,
}

impl BearingObserver for ConsoleObserver {
    fn bearing_changed(&mut self, bearing: f32) {
        println!("Bearing changed: {:.1}°", bearing);
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }
}

/// Canvas that prints what it is asked to draw
struct ConsoleCanvas;

impl Canvas for ConsoleCanvas {
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, _color: Color) {
        println!("  disc   ({:.1}, {:.1}) r={:.1}", center.x, center.y, radius);
    }

    fn stroke_line(&mut self, from: Point2<f32>, to: Point2<f32>, _color: Color) {
        println!(
            "  line   ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            from.x, from.y, to.x, to.y
        );
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point2<f32>,
        rotation: f32,
        _size: f32,
        _color: Color,
    ) {
        println!(
            "  text   {:>2} at ({:.1}, {:.1}) turned {:.1}°",
            text, origin.x, origin.y, rotation
        );
    }
}

fn main() {
    let style = DialStyle::default();
    let mut compass = Compass::with_observer(style.clone(), ConsoleObserver::default());

    // Device lying flat and turning from north towards east. Replace these
    // with the readings delivered by the platform's sensor service.
    let accelerometer = [0.0, 0.0, 9.81]; // m/s²
    let headings: [f32; 4] = [0.0, 30.0, 60.0, 90.0];

    for heading in headings {
        let (sin, cos) = heading.to_radians().sin_cos();
        let magnetometer = [-22.0 * sin, 22.0 * cos, -40.0]; // µT

        compass.on_sensor_sample(SensorSample::accelerometer(&accelerometer));
        compass.on_sensor_sample(SensorSample::magnetic_field(&magnetometer));

        if compass.observer().dirty {
            compass.observer_mut().dirty = false;
            compass.draw(SURFACE_SIZE, SURFACE_SIZE).replay(&style, &mut ConsoleCanvas);
        }
    }
}
