//! Temperature classification for display colouring.

/// Display band for a temperature, coldest to hottest.
///
/// Bands cover 5 °C half-open bins with the lower bound inclusive, plus the
/// two open-ended extremes. Every finite temperature maps to exactly one
/// band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemperatureBand {
    /// < 0
    Freezing,
    /// [0, 5)
    Cold,
    /// [5, 10)
    Chilly,
    /// [10, 15)
    Cool,
    /// [15, 20)
    Mild,
    /// [20, 25)
    Warm,
    /// [25, 30)
    Hot,
    /// [30, 35)
    VeryHot,
    /// [35, 40)
    Scorching,
    /// >= 40
    Extreme,
}

/// Map a temperature in °C to its display band.
pub fn classify(temp_c: f64) -> TemperatureBand {
    if temp_c < 0.0 {
        TemperatureBand::Freezing
    } else if temp_c < 5.0 {
        TemperatureBand::Cold
    } else if temp_c < 10.0 {
        TemperatureBand::Chilly
    } else if temp_c < 15.0 {
        TemperatureBand::Cool
    } else if temp_c < 20.0 {
        TemperatureBand::Mild
    } else if temp_c < 25.0 {
        TemperatureBand::Warm
    } else if temp_c < 30.0 {
        TemperatureBand::Hot
    } else if temp_c < 35.0 {
        TemperatureBand::VeryHot
    } else if temp_c < 40.0 {
        TemperatureBand::Scorching
    } else {
        TemperatureBand::Extreme
    }
}

#[cfg(test)]
mod tests {
    use super::classify;
    use super::TemperatureBand::*;

    #[test]
    fn boundaries_belong_to_the_warmer_bin() {
        assert_eq!(classify(-0.1), Freezing);
        assert_eq!(classify(0.0), Cold);
        assert_eq!(classify(4.9), Cold);
        assert_eq!(classify(5.0), Chilly);
        assert_eq!(classify(14.9), Cool);
        assert_eq!(classify(15.0), Mild);
        assert_eq!(classify(34.9), VeryHot);
        assert_eq!(classify(35.0), Scorching);
        assert_eq!(classify(39.9), Scorching);
        assert_eq!(classify(40.0), Extreme);
    }

    #[test]
    fn extremes_are_open_ended() {
        assert_eq!(classify(-40.0), Freezing);
        assert_eq!(classify(55.0), Extreme);
    }

    #[test]
    fn five_degree_steps_walk_through_every_band() {
        let samples = [-3.0, 2.0, 7.0, 12.0, 17.0, 22.0, 27.0, 32.0, 37.0, 42.0];
        let bands: Vec<_> = samples.iter().map(|t| classify(*t)).collect();
        for pair in bands.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should be colder than {:?}", pair[0], pair[1]);
        }
    }
}
