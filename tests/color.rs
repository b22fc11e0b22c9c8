mod tests {
    use dawn_composer::color::{
        BLACK, Rgb, blend_colors, fill_rainbow, fill_solid, rgb_from_u32, saturating_boost,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0), WHITE);
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0xFF_8000), Rgb::new(255, 128, 0));
        assert_eq!(rgb_from_u32(0), BLACK);
    }

    #[test]
    fn test_saturating_boost() {
        assert_eq!(
            saturating_boost(Rgb::new(10, 20, 30), 50, 30, 20),
            Rgb::new(60, 50, 50)
        );
        assert_eq!(
            saturating_boost(Rgb::new(250, 240, 250), 50, 30, 20),
            WHITE
        );
    }

    #[test]
    fn test_fill_solid() {
        let mut leds = [BLACK; 5];
        fill_solid(&mut leds, RED);
        assert_eq!(leds, [RED; 5]);
    }

    #[test]
    fn test_fill_rainbow() {
        let mut leds = [BLACK; 4];
        fill_rainbow(&mut leds, 0, 64);
        assert!(leds.iter().all(|led| *led != BLACK));
        assert_ne!(leds[0], leds[2]);

        let mut same = [BLACK; 2];
        fill_rainbow(&mut same, 0, 0);
        assert_eq!(same[0], same[1]);
    }
}
