/// Procedural crosshair glyph: four bars around an empty centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crosshair {
    /// Width and height of the glyph in pixels.
    pub size: usize,
    /// Bar thickness in pixels.
    pub thickness: usize,
    /// Empty radius around the centre.
    pub gap: usize,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self {
            size: 32,
            thickness: 3,
            gap: 9,
        }
    }
}

impl Crosshair {
    /// Row-major coverage mask, `size * size` entries.
    pub fn mask(&self) -> Vec<bool> {
        let half = (self.size / 2) as isize;
        let half_thickness = (self.thickness / 2) as isize;
        let gap = self.gap as isize;

        let mut mask = Vec::with_capacity(self.size * self.size);
        for y in 0..self.size as isize {
            for x in 0..self.size as isize {
                let dx = (x - half).abs();
                let dy = (y - half).abs();
                let horizontal = dy <= half_thickness && dx > gap;
                let vertical = dx <= half_thickness && dy > gap;
                mask.push(horizontal || vertical);
            }
        }
        mask
    }

    /// RGBA8 pixels: opaque white where covered, transparent elsewhere.
    pub fn rgba(&self) -> Vec<u8> {
        self.mask()
            .into_iter()
            .flat_map(|covered| if covered { [255; 4] } else { [0; 4] })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(mask: &[bool], size: usize, x: usize, y: usize) -> bool {
        mask[y * size + x]
    }

    #[test]
    fn centre_is_empty_and_bars_reach_edges() {
        let c = Crosshair::default();
        let mask = c.mask();
        assert_eq!(mask.len(), 32 * 32);
        assert!(!at(&mask, 32, 16, 16));
        assert!(!at(&mask, 32, 16 + 9, 16));
        assert!(at(&mask, 32, 16 + 10, 16));
        assert!(at(&mask, 32, 0, 16));
        assert!(at(&mask, 32, 16, 31));
        assert!(at(&mask, 32, 17, 0));
    }

    #[test]
    fn corners_are_empty() {
        let mask = Crosshair::default().mask();
        assert!(!at(&mask, 32, 0, 0));
        assert!(!at(&mask, 32, 31, 31));
    }

    #[test]
    fn bars_are_symmetric() {
        let c = Crosshair::default();
        let mask = c.mask();
        let covered = mask.iter().filter(|&&m| m).count();
        // Horizontal bars: 3 rows, x in [0, 6] and [26, 31].
        let per_bar = 3 * (7 + 6);
        assert_eq!(covered, 2 * per_bar);
    }

    #[test]
    fn rgba_matches_mask() {
        let c = Crosshair {
            size: 8,
            thickness: 1,
            gap: 2,
        };
        let mask = c.mask();
        let rgba = c.rgba();
        assert_eq!(rgba.len(), mask.len() * 4);
        for (i, covered) in mask.iter().enumerate() {
            let alpha = rgba[i * 4 + 3];
            assert_eq!(alpha == 255, *covered);
        }
    }
}
