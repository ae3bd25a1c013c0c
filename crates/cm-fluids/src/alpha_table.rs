//! Tabulated two-parameter alpha coefficients.
//!
//! The modified Soave alpha function `1 + m(1 - Tr) + n(1/Tr - 1)` needs a
//! compound-specific (m, n) pair. [`AlphaTable::msrk`] holds the published
//! fits (Soave 1984) keyed by component id.

use cm_core::ComponentId;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// (m, n) coefficients of the two-parameter alpha correction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaCoefficients {
    pub m: f64,
    pub n: f64,
}

/// Per-compound alpha override table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlphaTable {
    entries: BTreeMap<ComponentId, AlphaCoefficients>,
}

impl AlphaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared table of the modified-SRK (m, n) fits.
    pub fn msrk() -> &'static AlphaTable {
        static MSRK: OnceLock<AlphaTable> = OnceLock::new();
        MSRK.get_or_init(|| {
            let mut table = AlphaTable::new();
            for &(raw, m, n) in MSRK_COEFFICIENTS {
                if let Some(id) = ComponentId::new(raw) {
                    table.insert(id, AlphaCoefficients { m, n });
                }
            }
            table
        })
    }

    pub fn insert(&mut self, id: ComponentId, coefficients: AlphaCoefficients) {
        self.entries.insert(id, coefficients);
    }

    pub fn get(&self, id: ComponentId) -> Option<AlphaCoefficients> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[rustfmt::skip]
const MSRK_COEFFICIENTS: &[(u32, f64, f64)] = &[
    (1, 0.2563, -0.0742),
    (2, 0.4631, 0.0698),
    (3, 0.5558, 0.1208),
    (4, 0.6038, 0.1563),
    (5, 0.6251, 0.1818),
    (6, 0.6601, 0.1789),
    (7, 0.686, 0.196),
    (8, 0.7094, 0.2103),
    (9, 0.5887, 0.2217),
    (10, 0.7446, 0.2476),
    (11, 0.7841, 0.2828),
    (12, 0.8253, 0.3164),
    (13, 0.8675, 0.3472),
    (14, 0.8905, 0.3863),
    (15, 0.9467, 0.4091),
    (16, 0.9604, 0.4479),
    (17, 1.0212, 0.4686),
    (18, 1.0804, 0.483),
    (19, 1.1104, 0.5132),
    (20, 1.1274, 0.5506),
    (21, 1.1414, 0.5728),
    (22, 0.5202, 0.13),
    (23, 0.5883, 0.1567),
    (24, 0.6341, 0.1849),
    (25, 0.6383, 0.1966),
    (26, 0.7141, 0.1614),
    (27, 0.6435, 0.1833),
    (29, 0.693, 0.2011),
    (30, 0.6679, 0.2254),
    (31, 0.6738, 0.2186),
    (32, 0.6478, 0.2308),
    (33, 0.7099, 0.1782),
    (34, 0.6501, 0.2368),
    (35, 0.7318, 0.2359),
    (36, 0.6333, 0.1906),
    (37, 0.6611, 0.2168),
    (38, 0.6056, 0.2282),
    (39, 0.662, 0.2224),
    (40, 0.6043, 0.2285),
    (41, 0.7117, 0.2242),
    (42, 0.7737, 0.2415),
    (43, 0.8011, 0.2421),
    (44, 0.7941, 0.24),
    (45, 0.7458, 0.2512),
    (46, 0.4468, 0.1093),
    (47, 0.4871, 0.0717),
    (49, 0.5809, 0.2727),
    (50, 0.4594, 0.179),
    (51, 0.6358, 0.2614),
    (52, 0.7212, 0.2363),
    (53, 0.7245, 0.2269),
    (54, 0.6645, 0.2158),
    (55, 0.6923, 0.2162),
    (59, 0.7116, 0.2331),
    (60, 0.5791, 0.296),
    (62, 0.9499, 0.1633),
    (63, 0.7838, 0.1604),
    (65, 0.6553, 0.1672),
    (66, 0.6245, 0.2192),
    (67, 0.1877, 0.3468),
    (68, 0.6435, 0.1833),
    (70, 0.7921, 0.2712),
    (71, 0.7402, 0.284),
    (72, 0.7442, 0.3087),
    (73, 0.6696, 0.3491),
    (74, 0.7642, 0.3004),
    (75, 0.8569, 0.2542),
    (76, 0.8682, 0.2602),
    (77, 0.8987, 0.2663),
    (78, 0.846, 0.2952),
    (79, 0.771, 0.2675),
    (80, 0.7667, 0.2619),
    (81, 0.8149, 0.2987),
    (82, 0.7477, 0.2498),
    (84, 0.563, 0.2973),
    (85, 0.5713, 0.2902),
    (86, 0.6271, 0.259),
    (87, 0.6163, 0.2595),
    (88, 0.583, 0.2852),
    (89, 0.6041, 0.2748),
    (90, 1.0992, 0.629),
    (91, 1.0141, 0.7213),
    (92, 1.0682, 0.7931),
    (93, 0.7531, 0.2012),
    (94, 0.7237, 0.2208),
    (95, 0.734, 0.2141),
    (96, 0.8004, 0.1863),
    (97, 0.7171, 0.2211),
    (100, 0.6092, 0.2026),
    (102, 0.6211, 0.091),
    (104, 0.6288, 0.1124),
    (105, 0.4597, 0.1543),
    (110, 0.0587, 0.4971),
    (112, 0.6816, 0.1883),
    (113, 1.3498, -0.0406),
    (115, 0.6205, 0.1503),
    (116, 0.3729, 0.2357),
    (117, 1.3013, 0.2005),
    (118, 0.7131, 0.2602),
    (119, 0.6252, 0.2498),
    (121, 0.8767, 0.1444),
    (122, 0.4859, 0.2012),
    (126, 0.7404, 0.1779),
    (129, 0.6739, 0.1716),
    (131, 0.728, 0.2119),
    (132, 0.6518, 0.1743),
    (133, 0.672, 0.1727),
    (134, 1.1545, 0.4047),
    (136, 0.618, 0.1947),
    (137, 0.6086, 0.1984),
    (138, 0.7022, 0.2693),
    (140, 0.7951, 0.2205),
    (141, 0.6172, 0.3083),
    (142, 0.7417, 0.2777),
    (145, 0.6434, 0.7854),
    (146, 0.6917, 0.6958),
    (147, 0.6437, 0.1909),
    (151, 0.3898, 0.2928),
    (153, 0.7793, 0.2507),
    (155, 0.7623, 0.3142),
    (156, 0.7283, 0.3174),
    (157, 0.6278, 0.338),
    (159, 0.3453, 0.8989),
    (160, 0.4151, 0.8506),
    (161, 0.2374, 1.0035),
    (162, 0.7473, 0.2279),
    (165, 0.7564, 0.295),
    (166, 0.7672, 0.3457),
    (171, 0.6906, 0.2196),
    (172, 0.6717, 0.2318),
    (174, 0.8372, 0.3566),
    (177, 0.8276, 0.357),
    (179, 0.6505, 0.3002),
    (184, 0.5189, 0.3548),
    (185, 0.7566, 0.2427),
    (190, 0.8374, 0.2603),
    (191, 1.0163, 0.22),
    (194, 0.8274, 0.2762),
    (200, 0.9685, 0.2284),
    (215, 0.7012, 0.2056),
    (216, 0.5605, 0.2156),
    (217, 0.6302, 0.1838),
    (218, 0.6715, 0.1496),
    (219, 0.5368, 0.1387),
    (220, 0.665, 0.2013),
    (222, 0.7183, 0.1501),
    (224, 0.3104, 0.2501),
    (225, 0.6441, 0.1723),
    (226, 0.9938, 0.1296),
    (227, 0.5912, 0.1643),
    (229, 0.7427, 0.1995),
    (231, 0.6114, 0.2772),
    (243, 0.7249, 0.2041),
    (245, 0.5906, 0.2764),
    (247, 0.7847, 0.1974),
    (249, 0.5827, 0.3509),
    (269, 0.5638, 0.2599),
    (270, 0.5342, 0.3698),
    (290, 0.7603, 0.2272),
    (294, 0.5425, 0.3877),
    (299, 0.4048, 0.3313),
    (304, 0.7845, 0.2796),
    (309, 0.7724, 0.3439),
    (318, 0.8309, 0.2307),
    (321, 1.1822, 0.2499),
    (322, 0.7513, 0.1883),
    (329, 0.8299, 0.2889),
    (337, 0.7266, 0.2973),
    (346, 0.726, 0.454),
    (347, 0.9391, 0.3717),
    (369, 0.7486, 0.3091),
    (370, 0.7582, 0.3118),
    (371, 0.8343, 0.2334),
    (372, 0.6715, 0.2744),
    (373, 0.7381, 0.2666),
    (374, 0.7408, 0.2701),
    (375, 0.7193, 0.266),
    (377, 0.8866, 0.2469),
    (378, 0.8354, 0.2709),
    (379, 0.7465, 0.3012),
    (380, 0.8817, 0.2616),
    (381, 0.8725, 0.2613),
    (382, 0.8353, 0.2777),
    (398, 0.889, 0.3714),
    (401, 0.9051, 0.4144),
    (406, 0.9815, 0.3021),
    (407, 0.9634, 0.4428),
    (410, 0.9495, 0.498),
    (432, 0.7223, 0.2465),
    (433, 0.7421, 0.2447),
    (434, 0.7337, 0.2585),
    (435, 0.7228, 0.2214),
    (436, 0.7405, 0.2635),
    (437, 0.6954, 0.2182),
    (460, 0.7266, 0.2973),
    (541, 0.7313, 0.2535),
    (552, 0.7975, 0.2096),
    (553, 0.7435, 0.2392),
    (554, 0.7704, 0.2243),
    (577, 0.6317, 0.2563),
    (583, 0.6285, 0.2775),
    (590, 0.7992, 0.2995),
    (591, 0.7999, 0.3002),
    (592, 0.7594, 0.2856),
    (593, 0.7835, 0.2798),
    (594, 0.7688, 0.2858),
    (595, 0.7847, 0.2911),
    (596, 0.7632, 0.2611),
    (597, 0.7761, 0.2748),
    (598, 0.7909, 0.2934),
    (599, 0.7477, 0.233),
    (600, 0.761, 0.2558),
    (601, 0.7654, 0.2713),
    (602, 0.7665, 0.2373),
    (603, 0.5515, 0.3139),
    (611, 0.829, 0.3446),
    (630, 0.7076, 0.4292),
    (643, 0.7699, 0.1853),
    (693, 0.6623, 0.3918),
    (743, 0.7451, 0.2649),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use cm_core::component_id;

    #[test]
    fn propane_has_published_fit() {
        let c = AlphaTable::msrk().get(catalog::PROPANE).unwrap();
        assert_eq!(c, AlphaCoefficients { m: 0.6038, n: 0.1563 });
    }

    #[test]
    fn gaps_in_the_table_return_none() {
        // 28 is not fitted
        assert!(AlphaTable::msrk().get(component_id!(28)).is_none());
    }

    #[test]
    fn table_is_fully_loaded() {
        assert_eq!(AlphaTable::msrk().len(), MSRK_COEFFICIENTS.len());
    }
}
