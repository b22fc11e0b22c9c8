mod tests {
    use dawn_composer::math8::{
        blend8, ease_in_out, ease_in_out_quad, saturate8, scale8, unit8,
    };

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_ease_in_out_quad() {
        assert_eq!(ease_in_out_quad(0), 0);
        assert_eq!(ease_in_out_quad(255), 255);
        assert_eq!(ease_in_out_quad(64), 32);
        assert_eq!(ease_in_out_quad(128), 129);

        let mut previous = 0;
        for i in 0..=255 {
            let eased = ease_in_out_quad(i);
            assert!(eased >= previous, "curve dips at {i}");
            previous = eased;
        }
    }

    #[test]
    fn test_ease_in_out() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(-3.0), 0.0);
        assert_eq!(ease_in_out(7.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_unit8() {
        assert_eq!(unit8(0.0), 0);
        assert_eq!(unit8(0.5), 127);
        assert_eq!(unit8(1.0), 255);
        assert_eq!(unit8(2.0), 255);
        assert_eq!(unit8(-1.0), 0);
        assert_eq!(unit8(f32::NAN), 0);
    }

    #[test]
    fn test_saturate8() {
        assert_eq!(saturate8(12.9), 12);
        assert_eq!(saturate8(300.0), 255);
        assert_eq!(saturate8(-5.0), 0);
        assert_eq!(saturate8(f32::NAN), 0);
    }
}
