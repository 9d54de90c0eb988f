//! Round-trip equality oracle.
//!
//! Decides whether two frames are the same frame: same kind, same positional
//! data after canonicalizing to Cartesian SI values, and the same effective
//! value for every frame attribute (explicit or defaulted). Numbers are
//! compared with [`Tolerance`]; epochs as instants, whatever their form.

use thiserror::Error;

use crate::array::{broadcast_shapes, NdArray};
use crate::config;
use crate::converter::defaults::effective_attributes;
use crate::frame::{AttributeValue, Frame, FrameData};
use crate::quantity::Quantity;
use crate::representation::{Differential, DifferentialKind, Representation};
use crate::time::Epoch;

/// Numeric tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance in SI base units.
    pub atol: f64,
    /// Epoch tolerance in seconds.
    pub epoch_s: f64,
}

impl Tolerance {
    /// No tolerance at all.
    pub const EXACT: Tolerance = Tolerance {
        rtol: 0.0,
        atol: 0.0,
        epoch_s: 0.0,
    };

    /// Tolerances from the global [`config`].
    pub fn from_config() -> Self {
        let config = config::get();
        Self {
            rtol: config.rtol,
            atol: config.atol,
            epoch_s: config.epoch_tolerance_s,
        }
    }

    /// `|a - b| <= atol + rtol * max(|a|, |b|)`; two NaNs are equal.
    pub fn close(&self, a: f64, b: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return a.is_nan() && b.is_nan();
        }
        if a == b {
            return true;
        }
        (a - b).abs() <= self.atol + self.rtol * a.abs().max(b.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::from_config()
    }
}

/// The first difference found between two frames.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {reason}")]
pub struct Mismatch {
    /// Where the difference is, e.g. `obstime` or `galcen_coord.data`.
    pub path: String,
    /// What differs.
    pub reason: String,
}

impl Mismatch {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: if path.is_empty() { "frame".to_string() } else { path.to_string() },
            reason: reason.into(),
        }
    }

    /// Render for terminal output.
    pub fn report(&self, colored: bool) -> String {
        if colored {
            format!("{}: {}", colorize_path(&self.path), self.reason)
        } else {
            self.to_string()
        }
    }
}

#[cfg(feature = "colored-diagnostics")]
fn colorize_path(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.red().bold().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize_path(text: &str) -> String {
    text.to_owned()
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

/// Frame comparator with fixed tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Comparator {
    tolerance: Tolerance,
}

impl Comparator {
    /// Comparator with the given tolerances.
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Comparator that requires exact equality.
    pub fn exact() -> Self {
        Self::new(Tolerance::EXACT)
    }

    /// The tolerances in use.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// `Ok` if the frames are equal, otherwise the first mismatch.
    pub fn check(&self, a: &Frame, b: &Frame) -> Result<(), Mismatch> {
        self.check_frame("", a, b)
    }

    /// Whether the frames are equal.
    pub fn equal(&self, a: &Frame, b: &Frame) -> bool {
        self.check(a, b).is_ok()
    }

    fn check_frame(&self, path: &str, a: &Frame, b: &Frame) -> Result<(), Mismatch> {
        if a.kind() != b.kind() {
            return Err(Mismatch::new(
                &join(path, "kind"),
                format!("{} != {}", a.kind(), b.kind()),
            ));
        }

        match (a.data(), b.data()) {
            (None, None) => {}
            (Some(da), Some(db)) => self.check_data(&join(path, "data"), da, db)?,
            (Some(_), None) => return Err(Mismatch::new(&join(path, "data"), "missing on right")),
            (None, Some(_)) => return Err(Mismatch::new(&join(path, "data"), "missing on left")),
        }

        let resolve = |frame: &Frame| {
            effective_attributes(frame)
                .map_err(|e| Mismatch::new(path, format!("cannot resolve attributes: {e}")))
        };
        let (attrs_a, attrs_b) = (resolve(a)?, resolve(b)?);
        for (name, value_a) in &attrs_a {
            let value_b = attrs_b
                .get(name)
                .ok_or_else(|| Mismatch::new(&join(path, name), "missing on right"))?;
            self.check_attribute_at(&join(path, name), value_a, value_b)?;
        }
        Ok(())
    }

    fn check_data(&self, path: &str, a: &FrameData, b: &FrameData) -> Result<(), Mismatch> {
        self.check_representation(path, a.representation(), b.representation())?;
        let path = join(path, "differential");
        match (a.differential(), b.differential()) {
            (None, None) => Ok(()),
            (Some(da), Some(db)) => self.check_differential(
                &path,
                (a.representation(), da),
                (b.representation(), db),
            ),
            (Some(_), None) => Err(Mismatch::new(&path, "missing on right")),
            (None, Some(_)) => Err(Mismatch::new(&path, "missing on left")),
        }
    }

    /// Compare two attribute values.
    pub fn check_attribute(
        &self,
        name: &str,
        a: &AttributeValue,
        b: &AttributeValue,
    ) -> Result<(), Mismatch> {
        self.check_attribute_at(name, a, b)
    }

    fn check_attribute_at(
        &self,
        path: &str,
        a: &AttributeValue,
        b: &AttributeValue,
    ) -> Result<(), Mismatch> {
        match (a, b) {
            (AttributeValue::Epoch(ta), AttributeValue::Epoch(tb)) => self.check_epoch(path, ta, tb),
            (AttributeValue::Quantity(qa), AttributeValue::Quantity(qb)) => {
                self.check_quantity(path, qa, qb)
            }
            (AttributeValue::Representation(ra), AttributeValue::Representation(rb)) => {
                self.check_representation(path, ra, rb)
            }
            (AttributeValue::Differential(da), AttributeValue::Differential(db)) => {
                self.check_components(path, da, db)
            }
            (AttributeValue::Coordinate(fa), AttributeValue::Coordinate(fb)) => {
                self.check_frame(path, fa, fb)
            }
            _ => Err(Mismatch::new(path, "values of different kinds")),
        }
    }

    fn check_epoch(&self, path: &str, a: &Epoch, b: &Epoch) -> Result<(), Mismatch> {
        if a.shape() != b.shape() {
            return Err(Mismatch::new(
                path,
                format!("shape {:?} != {:?}", a.shape(), b.shape()),
            ));
        }
        if a.same_instant(b, self.tolerance.epoch_s) {
            Ok(())
        } else {
            Err(Mismatch::new(
                path,
                format!("epochs differ ({} {} vs {} {})", a.format(), a.scale().name(), b.format(), b.scale().name()),
            ))
        }
    }

    fn check_quantity(&self, path: &str, a: &Quantity, b: &Quantity) -> Result<(), Mismatch> {
        if a.physical_type() != b.physical_type() {
            return Err(Mismatch::new(
                path,
                format!("{} != {}", a.physical_type(), b.physical_type()),
            ));
        }
        self.check_arrays(path, &a.to_si(), &b.to_si())
    }

    fn check_arrays(&self, path: &str, a: &NdArray, b: &NdArray) -> Result<(), Mismatch> {
        if a.shape() != b.shape() {
            return Err(Mismatch::new(
                path,
                format!("shape {:?} != {:?}", a.shape(), b.shape()),
            ));
        }
        match a
            .data()
            .iter()
            .zip(b.data())
            .position(|(x, y)| !self.tolerance.close(*x, *y))
        {
            Some(i) => Err(Mismatch::new(
                path,
                format!("element {i}: {} != {}", a.data()[i], b.data()[i]),
            )),
            None => Ok(()),
        }
    }

    /// Compares per element by the norm of the difference vector, so a
    /// rounding error on one axis is measured against the whole length.
    fn check_vectors(
        &self,
        path: &str,
        axes: [&str; 3],
        a: [&NdArray; 3],
        b: [&NdArray; 3],
    ) -> Result<(), Mismatch> {
        for (axis, (xa, xb)) in axes.iter().zip(a.iter().zip(&b)) {
            if xa.shape() != xb.shape() {
                return Err(Mismatch::new(
                    &join(path, axis),
                    format!("shape {:?} != {:?}", xa.shape(), xb.shape()),
                ));
            }
        }
        let shape = a
            .iter()
            .try_fold(Vec::new(), |shape, x| broadcast_shapes(&shape, x.shape()))
            .map_err(|e| Mismatch::new(path, e.to_string()))?;
        let expand = |x: &NdArray| {
            x.broadcast_to(&shape)
                .map_err(|e| Mismatch::new(path, e.to_string()))
        };
        let a = [expand(a[0])?, expand(a[1])?, expand(a[2])?];
        let b = [expand(b[0])?, expand(b[1])?, expand(b[2])?];

        let n = a[0].len();
        let element = |v: &[NdArray; 3], i: usize| v.each_ref().map(|x| x.data()[i]);
        for i in 0..n {
            let (va, vb) = (element(&a, i), element(&b, i));
            if va == vb {
                continue;
            }
            if va.iter().chain(&vb).any(|x| !x.is_finite()) {
                // NaN and infinities have no norm; fall back to each axis.
                if let Some(k) = (0..3).find(|&k| !self.tolerance.close(va[k], vb[k])) {
                    return Err(Mismatch::new(
                        &join(path, axes[k]),
                        format!("element {i}: {} != {}", va[k], vb[k]),
                    ));
                }
                continue;
            }
            let norm = |v: [f64; 3]| v.iter().map(|x| x * x).sum::<f64>().sqrt();
            let diff = norm([va[0] - vb[0], va[1] - vb[1], va[2] - vb[2]]);
            let scale = norm(va).max(norm(vb));
            if diff > self.tolerance.atol + self.tolerance.rtol * scale {
                return Err(Mismatch::new(
                    path,
                    format!("element {i}: {va:?} != {vb:?}"),
                ));
            }
        }
        Ok(())
    }

    fn check_representation(
        &self,
        path: &str,
        a: &Representation,
        b: &Representation,
    ) -> Result<(), Mismatch> {
        let canonical = |r: &Representation| {
            r.to_canonical()
                .map_err(|e| Mismatch::new(path, format!("cannot canonicalize: {e}")))
        };
        let (ca, cb) = (canonical(a)?, canonical(b)?);
        if ca.physical_type != cb.physical_type {
            return Err(Mismatch::new(
                path,
                format!("{} != {}", ca.physical_type, cb.physical_type),
            ));
        }
        self.check_vectors(path, ["x", "y", "z"], ca.xyz.each_ref(), cb.xyz.each_ref())?;
        if let (Some(wa), Some(wb)) = (wrap_angle(a), wrap_angle(b)) {
            self.check_quantity(&join(path, "wrap_angle"), wa, wb)?;
        }
        Ok(())
    }

    fn check_differential(
        &self,
        path: &str,
        (base_a, a): (&Representation, &Differential),
        (base_b, b): (&Representation, &Differential),
    ) -> Result<(), Mismatch> {
        let canonical = |base: &Representation, d: &Differential| {
            d.to_canonical(base)
                .map_err(|e| Mismatch::new(path, format!("cannot canonicalize: {e}")))
        };
        let (kind_a, ca) = canonical(base_a, a)?;
        let (kind_b, cb) = canonical(base_b, b)?;
        if kind_a != kind_b {
            return Err(Mismatch::new(path, format!("{kind_a} != {kind_b}")));
        }
        if kind_a == DifferentialKind::Cartesian
            && let ([(ta, xa), (_, ya), (_, za)], [(tb, xb), (_, yb), (_, zb)]) =
                (ca.as_slice(), cb.as_slice())
        {
            if ta != tb {
                return Err(Mismatch::new(path, format!("{ta} != {tb}")));
            }
            return self.check_vectors(path, ["d_x", "d_y", "d_z"], [xa, ya, za], [xb, yb, zb]);
        }
        for (name, ((ta, va), (tb, vb))) in kind_a.component_names().iter().zip(ca.iter().zip(&cb)) {
            if ta != tb {
                return Err(Mismatch::new(&join(path, name), format!("{ta} != {tb}")));
            }
            self.check_arrays(&join(path, name), va, vb)?;
        }
        Ok(())
    }

    fn check_components(&self, path: &str, a: &Differential, b: &Differential) -> Result<(), Mismatch> {
        if a.kind() != b.kind() {
            return Err(Mismatch::new(path, format!("{} != {}", a.kind(), b.kind())));
        }
        for ((name, qa), (_, qb)) in a.components().into_iter().zip(b.components()) {
            self.check_quantity(&join(path, name), qa, qb)?;
        }
        Ok(())
    }
}

fn wrap_angle(repr: &Representation) -> Option<&Quantity> {
    match repr {
        Representation::Spherical { lon, .. } | Representation::UnitSpherical { lon, .. } => {
            Some(lon.wrap_angle())
        }
        _ => None,
    }
}

/// Whether two frames are equal under the configured tolerances.
pub fn frames_equal(a: &Frame, b: &Frame) -> bool {
    Comparator::default().equal(a, b)
}
