use super::{
    BandDefinition, ChannelRange, ChannelRaster, DuplexMode, FreqRange, RadioType,
};

/// EARFCN step, identical for every LTE band.
const LTE_SPACING_MHZ: f64 = 0.1;

const fn band(
    number: u16,
    name: &'static str,
    duplex: DuplexMode,
    dl: (f64, f64),
    ul: Option<(f64, f64)>,
    earfcn: (u32, u32),
) -> BandDefinition {
    BandDefinition {
        radio: RadioType::Lte,
        number,
        name,
        downlink: FreqRange::new(dl.0, dl.1),
        uplink: match ul {
            Some((low, high)) => Some(FreqRange::new(low, high)),
            None => None,
        },
        channels: ChannelRange::new(earfcn.0, earfcn.1),
        // N_Offs-DL is the first EARFCN of the band for every LTE band.
        raster: Some(ChannelRaster {
            offset: earfcn.0,
            spacing_mhz: LTE_SPACING_MHZ,
        }),
        duplex,
    }
}

const fn fdd(
    number: u16,
    name: &'static str,
    dl: (f64, f64),
    ul: (f64, f64),
    earfcn: (u32, u32),
) -> BandDefinition {
    band(number, name, DuplexMode::Fdd, dl, Some(ul), earfcn)
}

const fn tdd(
    number: u16,
    name: &'static str,
    freq: (f64, f64),
    earfcn: (u32, u32),
) -> BandDefinition {
    band(number, name, DuplexMode::Tdd, freq, None, earfcn)
}

const fn sdl(
    number: u16,
    name: &'static str,
    dl: (f64, f64),
    earfcn: (u32, u32),
) -> BandDefinition {
    band(number, name, DuplexMode::Sdl, dl, None, earfcn)
}

#[rustfmt::skip]
pub static LTE_BANDS: &[BandDefinition] = &[
    fdd(1, "IMT 2100", (2110.0, 2170.0), (1920.0, 1980.0), (0, 599)),
    fdd(2, "PCS 1900", (1930.0, 1990.0), (1850.0, 1910.0), (600, 1199)),
    fdd(3, "DCS 1800", (1805.0, 1880.0), (1710.0, 1785.0), (1200, 1949)),
    fdd(4, "AWS-1", (2110.0, 2155.0), (1710.0, 1755.0), (1950, 2399)),
    fdd(5, "CLR 850", (869.0, 894.0), (824.0, 849.0), (2400, 2649)),
    fdd(7, "IMT-E 2600", (2620.0, 2690.0), (2500.0, 2570.0), (2750, 3449)),
    fdd(8, "E-GSM 900", (925.0, 960.0), (880.0, 915.0), (3450, 3799)),
    fdd(9, "UMTS 1700 Japan", (1844.9, 1879.9), (1749.9, 1784.9), (3800, 4149)),
    fdd(10, "Extended AWS", (2110.0, 2170.0), (1710.0, 1770.0), (4150, 4749)),
    fdd(11, "Lower PDC 1500", (1475.9, 1495.9), (1427.9, 1447.9), (4750, 4949)),
    fdd(12, "Lower SMH 700", (729.0, 746.0), (699.0, 716.0), (5010, 5179)),
    fdd(13, "Upper SMH 700", (746.0, 756.0), (777.0, 787.0), (5180, 5279)),
    fdd(14, "Upper SMH 700 PS", (758.0, 768.0), (788.0, 798.0), (5280, 5379)),
    fdd(17, "Lower SMH 700 B/C", (734.0, 746.0), (704.0, 716.0), (5730, 5849)),
    fdd(18, "Lower 800 Japan", (860.0, 875.0), (815.0, 830.0), (5850, 5999)),
    fdd(19, "Upper 800 Japan", (875.0, 890.0), (830.0, 845.0), (6000, 6149)),
    fdd(20, "EU Digital Dividend 800", (791.0, 821.0), (832.0, 862.0), (6150, 6449)),
    fdd(21, "Upper PDC 1500", (1495.9, 1510.9), (1447.9, 1462.9), (6450, 6599)),
    fdd(22, "C-Band 3500 FDD", (3510.0, 3590.0), (3410.0, 3490.0), (6600, 7399)),
    fdd(23, "S-Band 2000", (2180.0, 2200.0), (2000.0, 2020.0), (7500, 7699)),
    fdd(24, "L-Band 1600", (1525.0, 1559.0), (1626.5, 1660.5), (7700, 8039)),
    fdd(25, "Extended PCS 1900", (1930.0, 1995.0), (1850.0, 1915.0), (8040, 8689)),
    fdd(26, "Extended CLR 850", (859.0, 894.0), (814.0, 849.0), (8690, 9039)),
    fdd(27, "SMR 800", (852.0, 869.0), (807.0, 824.0), (9040, 9209)),
    fdd(28, "APT 700", (758.0, 803.0), (703.0, 748.0), (9210, 9659)),
    sdl(29, "Lower SMH 700 SDL", (717.0, 728.0), (9660, 9769)),
    fdd(30, "WCS 2300", (2350.0, 2360.0), (2305.0, 2315.0), (9770, 9869)),
    fdd(31, "NMT 450", (462.5, 467.5), (452.5, 457.5), (9870, 9919)),
    sdl(32, "L-Band 1500 SDL", (1452.0, 1496.0), (9920, 10359)),
    tdd(33, "IMT 2000 TDD Lower", (1900.0, 1920.0), (36000, 36199)),
    tdd(34, "IMT 2000 TDD", (2010.0, 2025.0), (36200, 36349)),
    tdd(35, "PCS 1900 TDD Uplink", (1850.0, 1910.0), (36350, 36949)),
    tdd(36, "PCS 1900 TDD Downlink", (1930.0, 1990.0), (36950, 37549)),
    tdd(37, "PCS 1900 Center Gap", (1910.0, 1930.0), (37550, 37749)),
    tdd(38, "IMT-E 2600 TDD", (2570.0, 2620.0), (37750, 38249)),
    tdd(39, "DCS-IMT Gap 1900", (1880.0, 1920.0), (38250, 38649)),
    tdd(40, "S-Band 2300", (2300.0, 2400.0), (38650, 39649)),
    tdd(41, "BRS 2500", (2496.0, 2690.0), (39650, 41589)),
    tdd(42, "C-Band 3500", (3400.0, 3600.0), (41590, 43589)),
    tdd(43, "C-Band 3700", (3600.0, 3800.0), (43590, 45589)),
    tdd(44, "APT 700 TDD", (703.0, 803.0), (45590, 46589)),
    tdd(45, "L-Band 1500 TDD", (1447.0, 1467.0), (46590, 46789)),
    tdd(46, "LAA 5 GHz", (5150.0, 5925.0), (46790, 54539)),
    tdd(47, "V2X 5.9 GHz", (5855.0, 5925.0), (54540, 55239)),
    tdd(48, "CBRS 3500", (3550.0, 3700.0), (55240, 56739)),
    tdd(49, "CBRS LAA 3500", (3550.0, 3700.0), (56740, 58239)),
    tdd(50, "L-Band 1500 TDD Extended", (1432.0, 1517.0), (58240, 59089)),
    tdd(51, "L-Band 1427 TDD", (1427.0, 1432.0), (59090, 59139)),
    tdd(52, "C-Band 3300", (3300.0, 3400.0), (59140, 60139)),
    tdd(53, "S-Band 2400", (2483.5, 2495.0), (60140, 60254)),
    fdd(65, "Extended IMT 2100", (2110.0, 2200.0), (1920.0, 2010.0), (65536, 66435)),
    fdd(66, "AWS-3", (2110.0, 2200.0), (1710.0, 1780.0), (66436, 67335)),
    sdl(67, "EU 700 SDL", (738.0, 758.0), (67336, 67535)),
    fdd(68, "ME 700", (753.0, 783.0), (698.0, 728.0), (67536, 67835)),
    sdl(69, "IMT-E 2600 SDL", (2570.0, 2620.0), (67836, 68335)),
    fdd(70, "AWS-4", (1995.0, 2020.0), (1695.0, 1710.0), (68336, 68585)),
    fdd(71, "600 MHz", (617.0, 652.0), (663.0, 698.0), (68586, 68935)),
    fdd(72, "PMR 450 A", (461.0, 466.0), (451.0, 456.0), (68936, 68985)),
    fdd(73, "PMR 450 B", (460.0, 465.0), (450.0, 455.0), (68986, 69035)),
    fdd(74, "Lower L-Band 1500", (1475.0, 1518.0), (1427.0, 1470.0), (69036, 69465)),
    sdl(75, "L-Band 1500 SDL Extended", (1432.0, 1517.0), (69466, 70315)),
    sdl(76, "L-Band 1427 SDL", (1427.0, 1432.0), (70316, 70365)),
    fdd(85, "Extended Lower SMH 700", (728.0, 746.0), (698.0, 716.0), (70366, 70545)),
    fdd(87, "PMR 410", (420.0, 425.0), (410.0, 415.0), (70546, 70595)),
    fdd(88, "PMR 410 Extended", (422.0, 427.0), (412.0, 417.0), (70596, 70645)),
];
