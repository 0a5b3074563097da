use super::{BandDefinition, ChannelRange, DuplexMode, FreqRange, RadioType};

const fn band(
    number: u16,
    name: &'static str,
    duplex: DuplexMode,
    dl: (f64, f64),
    ul: Option<(f64, f64)>,
    arfcn: (u32, u32),
) -> BandDefinition {
    BandDefinition {
        radio: RadioType::Nr,
        number,
        name,
        downlink: FreqRange::new(dl.0, dl.1),
        uplink: match ul {
            Some((low, high)) => Some(FreqRange::new(low, high)),
            None => None,
        },
        channels: ChannelRange::new(arfcn.0, arfcn.1),
        raster: None,
        duplex,
    }
}

const fn fdd(
    number: u16,
    name: &'static str,
    dl: (f64, f64),
    ul: (f64, f64),
    arfcn: (u32, u32),
) -> BandDefinition {
    band(number, name, DuplexMode::Fdd, dl, Some(ul), arfcn)
}

const fn tdd(
    number: u16,
    name: &'static str,
    freq: (f64, f64),
    arfcn: (u32, u32),
) -> BandDefinition {
    band(number, name, DuplexMode::Tdd, freq, None, arfcn)
}

const fn sdl(number: u16, name: &'static str, dl: (f64, f64), arfcn: (u32, u32)) -> BandDefinition {
    band(number, name, DuplexMode::Sdl, dl, None, arfcn)
}

/// FR1 bands followed by FR2 (mmWave). SUL-only bands are left out since a
/// downlink measurement never lands on them.
#[rustfmt::skip]
pub static NR_BANDS: &[BandDefinition] = &[
    // FR1
    fdd(1, "IMT 2100", (2110.0, 2170.0), (1920.0, 1980.0), (422000, 434000)),
    fdd(2, "PCS 1900", (1930.0, 1990.0), (1850.0, 1910.0), (386000, 398000)),
    fdd(3, "DCS 1800", (1805.0, 1880.0), (1710.0, 1785.0), (361000, 376000)),
    fdd(5, "CLR 850", (869.0, 894.0), (824.0, 849.0), (173800, 178800)),
    fdd(7, "IMT-E 2600", (2620.0, 2690.0), (2500.0, 2570.0), (524000, 538000)),
    fdd(8, "E-GSM 900", (925.0, 960.0), (880.0, 915.0), (185000, 192000)),
    fdd(12, "Lower SMH 700", (729.0, 746.0), (699.0, 716.0), (145800, 149200)),
    fdd(13, "Upper SMH 700", (746.0, 756.0), (777.0, 787.0), (149200, 151200)),
    fdd(14, "Upper SMH 700 PS", (758.0, 768.0), (788.0, 798.0), (151600, 153600)),
    fdd(18, "Lower 800 Japan", (860.0, 875.0), (815.0, 830.0), (172000, 175000)),
    fdd(20, "EU Digital Dividend 800", (791.0, 821.0), (832.0, 862.0), (158200, 164200)),
    fdd(24, "L-Band 1600", (1525.0, 1559.0), (1626.5, 1660.5), (305000, 311800)),
    fdd(25, "Extended PCS 1900", (1930.0, 1995.0), (1850.0, 1915.0), (386000, 399000)),
    fdd(26, "Extended CLR 850", (859.0, 894.0), (814.0, 849.0), (171800, 178800)),
    fdd(28, "APT 700", (758.0, 803.0), (703.0, 748.0), (151600, 160600)),
    sdl(29, "Lower SMH 700 SDL", (717.0, 728.0), (143400, 145600)),
    fdd(30, "WCS 2300", (2350.0, 2360.0), (2305.0, 2315.0), (470000, 472000)),
    tdd(34, "IMT 2000 TDD", (2010.0, 2025.0), (402000, 405000)),
    tdd(38, "IMT-E 2600 TDD", (2570.0, 2620.0), (514000, 524000)),
    tdd(39, "DCS-IMT Gap 1900", (1880.0, 1920.0), (376000, 384000)),
    tdd(40, "S-Band 2300", (2300.0, 2400.0), (460000, 480000)),
    tdd(41, "BRS 2500", (2496.0, 2690.0), (499200, 537999)),
    tdd(46, "LAA 5 GHz", (5150.0, 5925.0), (743334, 795000)),
    tdd(48, "CBRS 3500", (3550.0, 3700.0), (636667, 646666)),
    tdd(50, "L-Band 1500 TDD", (1432.0, 1517.0), (286400, 303400)),
    tdd(51, "L-Band 1427 TDD", (1427.0, 1432.0), (285400, 286400)),
    tdd(53, "S-Band 2400", (2483.5, 2495.0), (496700, 499000)),
    fdd(65, "Extended IMT 2100", (2110.0, 2200.0), (1920.0, 2010.0), (422000, 440000)),
    fdd(66, "AWS-3", (2110.0, 2200.0), (1710.0, 1780.0), (422000, 440000)),
    fdd(70, "AWS-4", (1995.0, 2020.0), (1695.0, 1710.0), (399000, 404000)),
    fdd(71, "600 MHz", (617.0, 652.0), (663.0, 698.0), (123400, 130400)),
    fdd(74, "Lower L-Band 1500", (1475.0, 1518.0), (1427.0, 1470.0), (295000, 303600)),
    sdl(75, "L-Band 1500 SDL", (1432.0, 1517.0), (286400, 303400)),
    sdl(76, "Extended L-Band SDL", (1427.0, 1432.0), (285400, 286400)),
    tdd(77, "C-Band 3700", (3300.0, 4200.0), (620000, 680000)),
    tdd(78, "C-Band 3500", (3300.0, 3800.0), (620000, 653333)),
    tdd(79, "C-Band 4700", (4400.0, 5000.0), (693334, 733333)),
    fdd(85, "Extended Lower SMH 700", (728.0, 746.0), (698.0, 716.0), (145600, 149200)),
    tdd(90, "BRS 2500 Extended", (2496.0, 2690.0), (499200, 538000)),
    tdd(96, "U-NII 6 GHz", (5925.0, 7125.0), (795000, 875000)),
    tdd(101, "Railway 1900", (1900.0, 1910.0), (380000, 382000)),
    tdd(104, "Upper 6 GHz", (6425.0, 7125.0), (828334, 875000)),
    fdd(105, "Extended 600 MHz", (612.0, 652.0), (663.0, 703.0), (122400, 130400)),
    // FR2
    tdd(257, "LMDS 28 GHz", (26500.0, 29500.0), (2054166, 2104165)),
    tdd(258, "K-Band 26 GHz", (24250.0, 27500.0), (2016667, 2070832)),
    tdd(259, "V-Band 41 GHz", (39500.0, 43500.0), (2270833, 2337499)),
    tdd(260, "Ka-Band 39 GHz", (37000.0, 40000.0), (2229166, 2279165)),
    tdd(261, "Ka-Band 28 GHz", (27500.0, 28350.0), (2070833, 2084999)),
    tdd(262, "Upper 47 GHz", (47200.0, 48200.0), (2399166, 2415832)),
];
