/// The numeric identifier of a view object, unique within its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    pub value: i32,
}

impl Uid {
    pub fn new(value: i32) -> Self {
        Uid { value }
    }
}

impl From<i32> for Uid {
    fn from(value: i32) -> Self {
        Uid::new(value)
    }
}
