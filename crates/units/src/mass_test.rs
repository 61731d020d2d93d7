mod tests {
    use approx::assert_relative_eq;

    use crate::mass::{Mass, EARTH_MASS_KG, SOLAR_MASS_KG};

    #[test]
    fn test_mass_conversions() {
        let sun = Mass::from_solar_masses(1.0);
        assert_relative_eq!(sun.to_kg(), SOLAR_MASS_KG);

        let earth = Mass::from_kg(EARTH_MASS_KG);
        assert_relative_eq!(earth.to_earth_masses(), 1.0);

        // Round trip through solar masses
        let original = 3.0e-6;
        let round_trip = Mass::from_kg(Mass::from_solar_masses(original).to_kg()).to_solar_masses();
        assert_relative_eq!(round_trip, original);
    }

    #[test]
    fn test_mass_arithmetic_operations() {
        let mass1 = Mass::from_kg(2.0e10);
        let mass2 = Mass::from_kg(1.5e10);

        assert_relative_eq!((mass1 + mass2).to_kg(), 3.5e10);
        assert_relative_eq!((mass1 - mass2).to_kg(), 0.5e10);
        assert_relative_eq!((mass1 * 3.0).to_kg(), 6.0e10);
        assert_relative_eq!((mass1 / 4.0).to_kg(), 0.5e10);
        assert_relative_eq!(mass1 / mass2, 4.0 / 3.0);
    }

    #[test]
    fn test_sphere_mass() {
        // 100 m radius rock at 3000 kg/m³
        let rock = Mass::of_sphere(100.0, 3000.0);
        let expected = 4.0 / 3.0 * std::f64::consts::PI * 1.0e6 * 3000.0;
        assert_relative_eq!(rock.to_kg(), expected);
    }
}
