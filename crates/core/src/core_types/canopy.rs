//! Vertically stacked vegetation canopy.
//!
//! A [`Canopy`] owns an ordered sequence of [`Layer`]s, index 0 at the
//! ground and the last entry at the top. Aggregates (heights, LAI, biomass,
//! water) are recomputed from the current layers on every call.
//!
//! Stacking two canopies with [`Canopy::combine`] (or `+`) copies every layer
//! of both inputs, so the result never aliases either operand.

use crate::core_types::layer::{moisture_ratio, Layer};
use crate::error::CanopyError;
use serde::{Deserialize, Serialize};
use std::ops::Add;
use tracing::debug;

/// Ordered bottom-to-top stack of canopy layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Canopy {
    layers: Vec<Layer>,
}

impl Canopy {
    /// Create an empty canopy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canopy from layers ordered bottom to top
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Layers, bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer at `index` (0 = bottom)
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Mutable access to the layer at `index` (0 = bottom)
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Number of layers
    pub fn nlayers(&self) -> usize {
        self.layers.len()
    }

    /// Whether the canopy has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    /// Add a layer on top of the canopy.
    pub fn append_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
        debug!(nlayers = self.layers.len(), "appended canopy layer");
    }

    /// Remove and return the layer at `index`.
    ///
    /// The index is positional in the bottom-to-top order; layers above it
    /// shift down by one.
    ///
    /// # Errors
    /// [`CanopyError::LayerIndexOutOfRange`] if `index >= nlayers()`.
    pub fn delete_layer(&mut self, index: usize) -> Result<Layer, CanopyError> {
        let len = self.layers.len();
        if index >= len {
            return Err(CanopyError::LayerIndexOutOfRange { index, len });
        }
        let removed = self.layers.remove(index);
        debug!(index, nlayers = self.layers.len(), "deleted canopy layer");
        Ok(removed)
    }

    /// Set the number of layers.
    ///
    /// Growing appends [`Layer::default`] layers (1 m, 300 K) on top.
    /// Shrinking keeps the bottom `n_layers` layers and discards the rest.
    pub fn resize(&mut self, n_layers: usize) {
        let before = self.layers.len();
        self.layers.resize_with(n_layers, Layer::default);
        debug!(before, after = n_layers, "resized canopy");
    }

    /// Stack `top` on this canopy, returning a new canopy.
    ///
    /// The result holds copies of this canopy's layers followed by copies of
    /// `top`'s layers. Neither input is modified or shared.
    pub fn combine(&self, top: &Canopy) -> Canopy {
        let mut layers = Vec::with_capacity(self.layers.len() + top.layers.len());
        layers.extend(self.layers.iter().cloned());
        layers.extend(top.layers.iter().cloned());
        debug!(
            bottom = self.layers.len(),
            top = top.layers.len(),
            "combined canopies"
        );
        Canopy { layers }
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    /// Total canopy thickness (m)
    pub fn thickness(&self) -> f64 {
        self.layers.iter().map(|layer| *layer.thickness()).sum()
    }

    /// Per-layer thickness (m), bottom to top
    pub fn layer_thicknesses(&self) -> Vec<f64> {
        self.layers
            .iter()
            .map(|layer| *layer.thickness())
            .collect()
    }

    /// Height of the top of each layer (m), bottom to top
    pub fn layer_top_heights(&self) -> Vec<f64> {
        self.layers
            .iter()
            .scan(0.0, |height, layer| {
                *height += *layer.thickness();
                Some(*height)
            })
            .collect()
    }

    /// Interface heights (m): the ground (0) followed by every layer top
    pub fn interface_heights(&self) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(self.layer_top_heights())
            .collect()
    }

    /// Height of the bottom of each layer (m), bottom to top
    pub fn layer_bottom_heights(&self) -> Vec<f64> {
        let mut z = self.interface_heights();
        z.pop();
        z
    }

    /// Height of the middle of each layer (m), bottom to top
    pub fn layer_middle_heights(&self) -> Vec<f64> {
        self.layer_bottom_heights()
            .into_iter()
            .zip(self.layer_top_heights())
            .map(|(bottom, top)| (bottom + top) / 2.0)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Vegetation aggregates
    // ------------------------------------------------------------------------

    /// Per-layer leaf area index, bottom to top
    pub fn layer_lais(&self) -> Vec<f64> {
        self.layers.iter().map(Layer::lai).collect()
    }

    /// Per-layer temperature (K), bottom to top
    pub fn layer_temperatures(&self) -> Vec<f64> {
        self.layers
            .iter()
            .map(|layer| *layer.temperature())
            .collect()
    }

    /// Per-layer leaf volumetric water fraction (m³/m³), bottom to top
    pub fn layer_water_volumetric_fractions(&self) -> Vec<f64> {
        self.layers
            .iter()
            .map(Layer::water_volumetric_fraction)
            .collect()
    }

    /// Total leaf area index (m²/m²)
    pub fn lai(&self) -> f64 {
        self.layers.iter().map(Layer::lai).sum()
    }

    /// Total above-ground biomass (kg/m²)
    pub fn total_agb(&self) -> f64 {
        self.layers.iter().map(Layer::agb).sum()
    }

    /// Total vegetation water content (kg/m²)
    pub fn total_water_content(&self) -> f64 {
        self.layers.iter().map(Layer::water_content).sum()
    }

    /// Canopy-mean live fuel moisture content (kg/kg)
    ///
    /// Total water over total biomass, not the mean of per-layer ratios.
    /// `None` when the canopy holds no dry biomass.
    pub fn mean_lfmc(&self) -> Option<f64> {
        moisture_ratio(self.total_water_content(), self.total_agb())
    }
}

impl Add for &Canopy {
    type Output = Canopy;

    fn add(self, top: &Canopy) -> Canopy {
        self.combine(top)
    }
}

impl Add for Canopy {
    type Output = Canopy;

    fn add(mut self, top: Canopy) -> Canopy {
        self.layers.extend(top.layers);
        self
    }
}

impl FromIterator<Layer> for Canopy {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl Extend<Layer> for Canopy {
    fn extend<I: IntoIterator<Item = Layer>>(&mut self, iter: I) {
        self.layers.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::layer::LayerParams;
    use crate::core_types::units::{Kelvin, Meters, Millimeters};
    use approx::assert_relative_eq;

    fn layer(thickness: f64, lai: f64, water: f64) -> Layer {
        Layer::from_params(LayerParams {
            lai,
            water_volumetric_fraction: water,
            leaf_thickness: Millimeters::new(0.2),
            ..LayerParams::new(Meters::new(thickness), Kelvin::new(295.0))
        })
        .unwrap()
    }

    fn three_layer() -> Canopy {
        let outer = layer(0.5, 0.8, 0.2);
        let middle = layer(1.0, 1.2, 0.3);
        Canopy::from_layers(vec![outer.clone(), middle, outer])
    }

    #[test]
    fn test_empty_canopy() {
        let canopy = Canopy::new();
        assert_eq!(canopy.nlayers(), 0);
        assert_eq!(canopy.thickness(), 0.0);
        assert_eq!(canopy.interface_heights(), vec![0.0]);
        assert!(canopy.layer_bottom_heights().is_empty());
        assert_eq!(canopy.mean_lfmc(), None);
    }

    #[test]
    fn test_heights() {
        let canopy = three_layer();
        assert_relative_eq!(canopy.thickness(), 2.0);
        assert_eq!(canopy.layer_top_heights(), vec![0.5, 1.5, 2.0]);
        assert_eq!(canopy.interface_heights(), vec![0.0, 0.5, 1.5, 2.0]);
        assert_eq!(canopy.layer_bottom_heights(), vec![0.0, 0.5, 1.5]);
        assert_eq!(canopy.layer_middle_heights(), vec![0.25, 1.0, 1.75]);
    }

    #[test]
    fn test_aggregates_sum_layers() {
        let canopy = three_layer();
        assert_relative_eq!(canopy.lai(), 2.8, epsilon = 1e-12);

        let agb: f64 = canopy.layers().iter().map(Layer::agb).sum();
        let water: f64 = canopy.layers().iter().map(Layer::water_content).sum();
        assert_relative_eq!(canopy.total_agb(), agb);
        assert_relative_eq!(canopy.total_water_content(), water);
        assert_relative_eq!(canopy.mean_lfmc().unwrap(), water / agb);
    }

    #[test]
    fn test_append_and_delete() {
        let mut canopy = three_layer();
        canopy.append_layer(layer(2.0, 0.0, 0.0));
        assert_eq!(canopy.nlayers(), 4);
        assert_eq!(canopy.layer(3).unwrap().thickness(), Meters::new(2.0));

        let removed = canopy.delete_layer(1).unwrap();
        assert_eq!(removed.thickness(), Meters::new(1.0));
        assert_eq!(canopy.layer_thicknesses(), vec![0.5, 0.5, 2.0]);

        let err = canopy.delete_layer(3).unwrap_err();
        assert_eq!(err, CanopyError::LayerIndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn test_resize_grow_uses_default_layers() {
        let mut canopy = three_layer();
        canopy.resize(5);
        assert_eq!(canopy.nlayers(), 5);
        for added in &canopy.layers()[3..] {
            assert_eq!(added.thickness(), Meters::new(1.0));
            assert_eq!(added.temperature(), Kelvin::new(300.0));
            assert_eq!(added.lai(), 0.0);
        }
    }

    #[test]
    fn test_resize_shrink_keeps_bottom_layers() {
        let original = three_layer();
        let mut canopy = original.clone();
        canopy.resize(2);
        assert_eq!(canopy.layers(), &original.layers()[..2]);

        canopy.resize(2);
        assert_eq!(canopy.nlayers(), 2);
        canopy.resize(0);
        assert!(canopy.is_empty());
    }

    #[test]
    fn test_combine_places_second_on_top() {
        let bottom = Canopy::from_layers(vec![layer(0.5, 1.0, 0.1)]);
        let top = Canopy::from_layers(vec![layer(2.0, 3.0, 0.6), layer(1.0, 0.5, 0.4)]);

        let stacked = bottom.combine(&top);
        assert_eq!(stacked.layer_thicknesses(), vec![0.5, 2.0, 1.0]);
        assert_ne!(stacked, top.combine(&bottom));
        assert_eq!(&bottom + &top, stacked);
        assert_eq!(bottom.clone() + top.clone(), stacked);
    }

    #[test]
    fn test_combine_does_not_alias_inputs() {
        let bottom = three_layer();
        let top = three_layer();
        let mut stacked = &bottom + &top;

        stacked.layer_mut(0).unwrap().set_lai(9.0).unwrap();
        stacked.layer_mut(4).unwrap().set_lai(9.0).unwrap();

        assert_eq!(bottom, three_layer());
        assert_eq!(top, three_layer());
    }
}
