//! Bundled running economy dataset.
//!
//! Smoothed level-ground running economy curve sampled every 0.05 m/s,
//! shaped after the Black et al. (2018) energetics model. Columns are
//! speed (m/s), cost of transport (J/kg/m) and metabolic power (J/kg/s).
//! Metabolic power is cost of transport times speed, rounded to 5 places,
//! except the 0.05 m/s row, which carries 0.303 J/kg/s.

use super::EconomySample;

pub(super) static REFERENCE_SAMPLES: [EconomySample; 141] = [
    EconomySample::new(0.00, 6.0976, 0.00000),
    EconomySample::new(0.05, 6.0592, 0.30300),
    EconomySample::new(0.10, 6.0189, 0.60189),
    EconomySample::new(0.15, 5.9805, 0.89707),
    EconomySample::new(0.20, 5.9426, 1.18852),
    EconomySample::new(0.25, 5.9051, 1.47628),
    EconomySample::new(0.30, 5.8680, 1.76040),
    EconomySample::new(0.35, 5.8314, 2.04099),
    EconomySample::new(0.40, 5.7949, 2.31796),
    EconomySample::new(0.45, 5.7589, 2.59150),
    EconomySample::new(0.50, 5.7229, 2.86145),
    EconomySample::new(0.55, 5.6869, 3.12779),
    EconomySample::new(0.60, 5.6508, 3.39048),
    EconomySample::new(0.65, 5.6143, 3.64929),
    EconomySample::new(0.70, 5.5774, 3.90418),
    EconomySample::new(0.75, 5.5400, 4.15500),
    EconomySample::new(0.80, 5.5019, 4.40152),
    EconomySample::new(0.85, 5.4634, 4.64389),
    EconomySample::new(0.90, 5.4243, 4.88187),
    EconomySample::new(0.95, 5.3850, 5.11575),
    EconomySample::new(1.00, 5.3456, 5.34560),
    EconomySample::new(1.05, 5.3063, 5.57162),
    EconomySample::new(1.10, 5.2673, 5.79403),
    EconomySample::new(1.15, 5.2286, 6.01289),
    EconomySample::new(1.20, 5.1903, 6.22836),
    EconomySample::new(1.25, 5.1523, 6.44038),
    EconomySample::new(1.30, 5.1142, 6.64846),
    EconomySample::new(1.35, 5.0763, 6.85301),
    EconomySample::new(1.40, 5.0382, 7.05348),
    EconomySample::new(1.45, 4.9998, 7.24971),
    EconomySample::new(1.50, 4.9612, 7.44180),
    EconomySample::new(1.55, 4.9224, 7.62972),
    EconomySample::new(1.60, 4.8834, 7.81344),
    EconomySample::new(1.65, 4.8444, 7.99326),
    EconomySample::new(1.70, 4.8054, 8.16918),
    EconomySample::new(1.75, 4.7664, 8.34120),
    EconomySample::new(1.80, 4.7274, 8.50932),
    EconomySample::new(1.85, 4.6885, 8.67373),
    EconomySample::new(1.90, 4.6496, 8.83424),
    EconomySample::new(1.95, 4.6107, 8.99086),
    EconomySample::new(2.00, 4.5717, 9.14340),
    EconomySample::new(2.05, 4.5326, 9.29183),
    EconomySample::new(2.10, 4.4935, 9.43635),
    EconomySample::new(2.15, 4.4546, 9.57739),
    EconomySample::new(2.20, 4.4157, 9.71454),
    EconomySample::new(2.25, 4.3771, 9.84848),
    EconomySample::new(2.30, 4.3388, 9.97924),
    EconomySample::new(2.35, 4.3009, 10.10712),
    EconomySample::new(2.40, 4.2635, 10.23240),
    EconomySample::new(2.45, 4.2268, 10.35566),
    EconomySample::new(2.50, 4.1908, 10.47700),
    EconomySample::new(2.55, 4.1556, 10.59678),
    EconomySample::new(2.60, 4.1213, 10.71538),
    EconomySample::new(2.65, 4.0880, 10.83320),
    EconomySample::new(2.70, 4.0557, 10.95039),
    EconomySample::new(2.75, 4.0246, 11.06765),
    EconomySample::new(2.80, 3.9948, 11.18544),
    EconomySample::new(2.85, 3.9664, 11.30424),
    EconomySample::new(2.90, 3.9397, 11.42513),
    EconomySample::new(2.95, 3.9147, 11.54837),
    EconomySample::new(3.00, 3.8917, 11.67510),
    EconomySample::new(3.05, 3.8706, 11.80533),
    EconomySample::new(3.10, 3.8518, 11.94058),
    EconomySample::new(3.15, 3.8352, 12.08088),
    EconomySample::new(3.20, 3.8210, 12.22720),
    EconomySample::new(3.25, 3.8090, 12.37925),
    EconomySample::new(3.30, 3.7996, 12.53868),
    EconomySample::new(3.35, 3.7926, 12.70521),
    EconomySample::new(3.40, 3.7881, 12.87954),
    EconomySample::new(3.45, 3.7862, 13.06239),
    EconomySample::new(3.50, 3.7865, 13.25275),
    EconomySample::new(3.55, 3.7871, 13.44421),
    EconomySample::new(3.60, 3.7877, 13.63572),
    EconomySample::new(3.65, 3.7884, 13.82766),
    EconomySample::new(3.70, 3.7892, 14.02004),
    EconomySample::new(3.75, 3.7901, 14.21287),
    EconomySample::new(3.80, 3.7913, 14.40694),
    EconomySample::new(3.85, 3.7928, 14.60228),
    EconomySample::new(3.90, 3.7945, 14.79855),
    EconomySample::new(3.95, 3.7965, 14.99618),
    EconomySample::new(4.00, 3.7986, 15.19440),
    EconomySample::new(4.05, 3.8011, 15.39445),
    EconomySample::new(4.10, 3.8038, 15.59558),
    EconomySample::new(4.15, 3.8067, 15.79781),
    EconomySample::new(4.20, 3.8099, 16.00158),
    EconomySample::new(4.25, 3.8133, 16.20652),
    EconomySample::new(4.30, 3.8169, 16.41267),
    EconomySample::new(4.35, 3.8208, 16.62048),
    EconomySample::new(4.40, 3.8248, 16.82912),
    EconomySample::new(4.45, 3.8291, 17.03949),
    EconomySample::new(4.50, 3.8336, 17.25120),
    EconomySample::new(4.55, 3.8384, 17.46472),
    EconomySample::new(4.60, 3.8434, 17.67964),
    EconomySample::new(4.65, 3.8486, 17.89599),
    EconomySample::new(4.70, 3.8540, 18.11380),
    EconomySample::new(4.75, 3.8596, 18.33310),
    EconomySample::new(4.80, 3.8655, 18.55440),
    EconomySample::new(4.85, 3.8716, 18.77726),
    EconomySample::new(4.90, 3.8779, 19.00171),
    EconomySample::new(4.95, 3.8845, 19.22828),
    EconomySample::new(5.00, 3.8912, 19.45600),
    EconomySample::new(5.05, 3.8982, 19.68591),
    EconomySample::new(5.10, 3.9055, 19.91805),
    EconomySample::new(5.15, 3.9129, 20.15144),
    EconomySample::new(5.20, 3.9206, 20.38712),
    EconomySample::new(5.25, 3.9285, 20.62463),
    EconomySample::new(5.30, 3.9366, 20.86398),
    EconomySample::new(5.35, 3.9450, 21.10575),
    EconomySample::new(5.40, 3.9535, 21.34890),
    EconomySample::new(5.45, 3.9623, 21.59454),
    EconomySample::new(5.50, 3.9713, 21.84215),
    EconomySample::new(5.55, 3.9806, 22.09233),
    EconomySample::new(5.60, 3.9901, 22.34456),
    EconomySample::new(5.65, 3.9998, 22.59887),
    EconomySample::new(5.70, 4.0097, 22.85529),
    EconomySample::new(5.75, 4.0198, 23.11385),
    EconomySample::new(5.80, 4.0302, 23.37516),
    EconomySample::new(5.85, 4.0408, 23.63868),
    EconomySample::new(5.90, 4.0516, 23.90444),
    EconomySample::new(5.95, 4.0627, 24.17307),
    EconomySample::new(6.00, 4.0739, 24.44340),
    EconomySample::new(6.05, 4.0854, 24.71667),
    EconomySample::new(6.10, 4.0972, 24.99292),
    EconomySample::new(6.15, 4.1091, 25.27097),
    EconomySample::new(6.20, 4.1213, 25.55206),
    EconomySample::new(6.25, 4.1337, 25.83563),
    EconomySample::new(6.30, 4.1463, 26.12169),
    EconomySample::new(6.35, 4.1592, 26.41092),
    EconomySample::new(6.40, 4.1722, 26.70208),
    EconomySample::new(6.45, 4.1855, 26.99648),
    EconomySample::new(6.50, 4.1990, 27.29350),
    EconomySample::new(6.55, 4.2128, 27.59384),
    EconomySample::new(6.60, 4.2268, 27.89688),
    EconomySample::new(6.65, 4.2410, 28.20265),
    EconomySample::new(6.70, 4.2554, 28.51118),
    EconomySample::new(6.75, 4.2700, 28.82250),
    EconomySample::new(6.80, 4.2849, 29.13732),
    EconomySample::new(6.85, 4.3000, 29.45500),
    EconomySample::new(6.90, 4.3153, 29.77557),
    EconomySample::new(6.95, 4.3309, 30.09975),
    EconomySample::new(7.00, 4.3466, 30.42620),
];
