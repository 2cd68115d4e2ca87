use image::{Luma, LumaA, Rgb, Rgba};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RGBColorFormat<T> {
    red: T,
    green: T,
    blue: T,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }
}

impl<T: Copy> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        RGBColorFormat { red, green, blue }
    }

    pub fn red(&self) -> T {
        self.red
    }

    pub fn green(&self) -> T {
        self.green
    }

    pub fn blue(&self) -> T {
        self.blue
    }

    pub fn component(&self, channel: Channel) -> T {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }
}

impl From<&Rgb<u8>> for RGBColorFormat<u8> {
    fn from(value: &Rgb<u8>) -> Self {
        let [red, green, blue] = value.0;
        RGBColorFormat { red, green, blue }
    }
}

/// Alpha is dropped, the color components are kept as they are.
impl From<&Rgba<u8>> for RGBColorFormat<u8> {
    fn from(value: &Rgba<u8>) -> Self {
        let [red, green, blue, _] = value.0;
        RGBColorFormat { red, green, blue }
    }
}

impl From<&Luma<u8>> for RGBColorFormat<u8> {
    fn from(value: &Luma<u8>) -> Self {
        let [gray] = value.0;
        RGBColorFormat::new(gray, gray, gray)
    }
}

impl From<&LumaA<u8>> for RGBColorFormat<u8> {
    fn from(value: &LumaA<u8>) -> Self {
        let [gray, _] = value.0;
        RGBColorFormat::new(gray, gray, gray)
    }
}
