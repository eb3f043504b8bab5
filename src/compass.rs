//! Compass widget: wires the estimator, the bearing cell and the dial
//! renderer together for a host UI

use crate::dial::{DialRenderer, Frame, FontMetrics, MonospaceMetrics};
use crate::error::CompassError;
use crate::estimator::OrientationEstimator;
use crate::types::{DialStyle, EstimatorSettings, SensorSample};

/// Host hooks fired when the bearing changes
///
/// Both methods default to doing nothing.
pub trait BearingObserver {
    /// New bearing stored; hosts announce it to assistive technology here
    fn bearing_changed(&mut self, _bearing: f32) {}

    /// Dial needs to be drawn again
    fn request_redraw(&mut self) {}
}

/// Observer for hosts that poll instead of listening
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BearingObserver for NoopObserver {}

/// Compass widget core
///
/// Feed it sensor samples as they arrive and call [`Compass::draw`] once per
/// frame. All calls are expected on one thread. Sensor problems never
/// surface as errors: the dial keeps the last good bearing, or stays
/// unrotated until the first one.
///
/// # Example
/// ```
/// use compass_dial::{Compass, DialStyle, SensorSample};
///
/// let mut compass = Compass::new(DialStyle::default());
/// assert_eq!(compass.bearing(), None);
///
/// compass.on_sensor_sample(SensorSample::accelerometer(&[0.0, 0.0, 9.81]));
/// compass.on_sensor_sample(SensorSample::magnetic_field(&[-20.0, 0.0, -40.0]));
///
/// // Facing east: the dial turns 90° anticlockwise to keep N on north
/// let bearing = compass.bearing().unwrap();
/// assert!((bearing + 90.0).abs() < 1e-3);
///
/// let frame = compass.draw(240.0, 240.0);
/// assert_eq!(frame.ticks().count(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct Compass<O = NoopObserver, M = MonospaceMetrics> {
    estimator: OrientationEstimator,
    renderer: DialRenderer<M>,
    observer: O,
    bearing: Option<f32>,
}

impl Compass {
    pub fn new(style: DialStyle) -> Self {
        Self::with_observer(style, NoopObserver)
    }
}

impl<O: BearingObserver> Compass<O> {
    pub fn with_observer(style: DialStyle, observer: O) -> Self {
        Self::with_parts(
            OrientationEstimator::new(),
            DialRenderer::new(style),
            observer,
        )
    }
}

impl<O: BearingObserver, M: FontMetrics> Compass<O, M> {
    /// Assemble a compass from separately configured parts
    pub fn with_parts(
        estimator: OrientationEstimator,
        renderer: DialRenderer<M>,
        observer: O,
    ) -> Self {
        Self {
            estimator,
            renderer,
            observer,
            bearing: None,
        }
    }

    /// Create a compass with custom estimator thresholds and font metrics
    pub fn with_settings(
        settings: EstimatorSettings,
        style: DialStyle,
        metrics: M,
        observer: O,
    ) -> Self {
        Self::with_parts(
            OrientationEstimator::with_settings(settings),
            DialRenderer::with_metrics(style, metrics),
            observer,
        )
    }

    /// Current bearing in degrees, `None` until both sensors have reported
    /// and produced a usable orientation
    pub fn bearing(&self) -> Option<f32> {
        self.bearing
    }

    pub fn estimator(&self) -> &OrientationEstimator {
        &self.estimator
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Handle one sample from the host's sensor feed
    ///
    /// Returns whether the bearing was updated.
    pub fn on_sensor_sample(&mut self, sample: SensorSample<'_>) -> bool {
        match self.estimator.ingest(sample) {
            Ok(bearing) => {
                self.set_bearing(bearing);
                true
            }
            Err(error @ CompassError::InvalidSample { .. }) => {
                log::warn!("Dropping sensor sample: {}", error);
                false
            }
            Err(error) => {
                log::debug!("Bearing not updated: {}", error);
                false
            }
        }
    }

    /// Store a bearing, then notify the observer and request one redraw
    pub fn set_bearing(&mut self, bearing: f32) {
        log::trace!("Bearing {:.2}°", bearing);
        self.bearing = Some(bearing);
        self.observer.bearing_changed(bearing);
        self.observer.request_redraw();
    }

    /// Lay out the dial for a `width × height` surface
    pub fn draw(&self, width: f32, height: f32) -> Frame {
        self.renderer.render(width, height, self.bearing)
    }

    pub fn style(&self) -> &DialStyle {
        self.renderer.style()
    }

    /// Forget sensor readings and the bearing
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.bearing = None;
    }
}
