//! Window geometry seam used by the settings store

/// A window whose size and position can be saved and restored
pub trait WindowGeometry {
    /// Current (left, top) position
    fn position(&self) -> (i32, i32);

    /// Current (width, height) size
    fn size(&self) -> (i32, i32);

    /// Size to use the next time the window is shown
    fn set_default_size(&mut self, width: i32, height: i32);

    fn move_to(&mut self, left: i32, top: i32);
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::WindowGeometry;

    /// Window double recording every geometry change
    #[derive(Debug)]
    pub struct FakeWindow {
        pub position: (i32, i32),
        pub size: (i32, i32),
        pub moved: usize,
        pub resized: usize,
    }

    impl FakeWindow {
        pub fn new(position: (i32, i32), size: (i32, i32)) -> Self {
            Self {
                position,
                size,
                moved: 0,
                resized: 0,
            }
        }
    }

    impl WindowGeometry for FakeWindow {
        fn position(&self) -> (i32, i32) {
            self.position
        }

        fn size(&self) -> (i32, i32) {
            self.size
        }

        fn set_default_size(&mut self, width: i32, height: i32) {
            self.size = (width, height);
            self.resized += 1;
        }

        fn move_to(&mut self, left: i32, top: i32) {
            self.position = (left, top);
            self.moved += 1;
        }
    }
}
