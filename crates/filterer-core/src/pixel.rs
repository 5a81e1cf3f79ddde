/// A packed RGBA pixel: red in the lowest byte, alpha in the highest
/// (`R | G << 8 | B << 16 | A << 24`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Pixel(pub u32);

const RED_SHIFT: u32 = 0;
const GREEN_SHIFT: u32 = 8;
const BLUE_SHIFT: u32 = 16;
const ALPHA_SHIFT: u32 = 24;

impl Pixel {
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(
            (red as u32) << RED_SHIFT
                | (green as u32) << GREEN_SHIFT
                | (blue as u32) << BLUE_SHIFT
                | (alpha as u32) << ALPHA_SHIFT,
        )
    }

    /// The raw packed value.
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    const fn channel(self, shift: u32) -> u8 {
        ((self.0 >> shift) & 0xFF) as u8
    }

    // Only the target channel's 8 bits are touched.
    #[inline]
    fn set_channel(&mut self, shift: u32, value: u8) {
        self.0 = (self.0 & !(0xFF << shift)) | ((value as u32) << shift);
    }

    pub const fn red(self) -> u8 {
        self.channel(RED_SHIFT)
    }

    pub const fn green(self) -> u8 {
        self.channel(GREEN_SHIFT)
    }

    pub const fn blue(self) -> u8 {
        self.channel(BLUE_SHIFT)
    }

    pub const fn alpha(self) -> u8 {
        self.channel(ALPHA_SHIFT)
    }

    pub fn set_red(&mut self, value: u8) {
        self.set_channel(RED_SHIFT, value);
    }

    pub fn set_green(&mut self, value: u8) {
        self.set_channel(GREEN_SHIFT, value);
    }

    pub fn set_blue(&mut self, value: u8) {
        self.set_channel(BLUE_SHIFT, value);
    }

    pub fn set_alpha(&mut self, value: u8) {
        self.set_channel(ALPHA_SHIFT, value);
    }

    /// Channels in memory order.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_layout() {
        let p = Pixel::from_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(p.value(), 0x4433_2211);
        assert_eq!(p.to_bytes(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_channel_getters() {
        let p = Pixel::from_rgba(1, 2, 3, 4);
        assert_eq!(p.red(), 1);
        assert_eq!(p.green(), 2);
        assert_eq!(p.blue(), 3);
        assert_eq!(p.alpha(), 4);
    }

    #[test]
    fn test_setters_leave_other_channels_untouched() {
        let mut p = Pixel::from_rgba(10, 20, 30, 40);
        p.set_red(255);
        assert_eq!(p.to_rgba(), [255, 20, 30, 40]);
        p.set_green(0);
        assert_eq!(p.to_rgba(), [255, 0, 30, 40]);
        p.set_blue(128);
        assert_eq!(p.to_rgba(), [255, 0, 128, 40]);
        p.set_alpha(255);
        assert_eq!(p.to_rgba(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_set_alpha_does_not_sign_extend() {
        let mut p = Pixel::from_rgba(0, 0, 0, 0);
        p.set_alpha(0xFF);
        assert_eq!(p.value(), 0xFF00_0000);
        p.set_alpha(0);
        assert_eq!(p.value(), 0);
    }

    #[test]
    fn test_from_bytes_matches_from_rgba() {
        assert_eq!(
            Pixel::from_bytes([9, 8, 7, 6]),
            Pixel::from_rgba(9, 8, 7, 6)
        );
    }
}
