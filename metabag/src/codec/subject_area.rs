//! `SubjectArea` and `SubjectLocation`: the array length picks the shape.

/// Where the main subject is.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SubjectArea {
    /// Two values.
    Point { x: u16, y: u16 },

    /// Three values.
    Circle { x: u16, y: u16, diameter: u16 },

    /// Four values.
    Rectangle {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },
}

impl SubjectArea {
    /// Infers the shape from the number of values.
    ///
    /// Any length other than 2, 3 or 4 gives `None`.
    pub fn from_values(values: &[u16]) -> Option<Self> {
        match *values {
            [x, y] => Some(SubjectArea::Point { x, y }),
            [x, y, diameter] => Some(SubjectArea::Circle { x, y, diameter }),
            [x, y, width, height] => Some(SubjectArea::Rectangle {
                x,
                y,
                width,
                height,
            }),
            _ => {
                log::debug!("A subject area can't have `{}` values.", values.len());
                None
            }
        }
    }

    /// The values in stored order.
    pub fn values(&self) -> Vec<u16> {
        match *self {
            SubjectArea::Point { x, y } => vec![x, y],
            SubjectArea::Circle { x, y, diameter } => vec![x, y, diameter],
            SubjectArea::Rectangle {
                x,
                y,
                width,
                height,
            } => vec![x, y, width, height],
        }
    }

    /// The centre, shared by every shape.
    pub fn center(&self) -> (u16, u16) {
        match *self {
            SubjectArea::Point { x, y }
            | SubjectArea::Circle { x, y, .. }
            | SubjectArea::Rectangle { x, y, .. } => (x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SubjectArea;

    #[test]
    fn length_picks_the_shape() {
        assert_eq!(
            SubjectArea::from_values(&[10, 20]),
            Some(SubjectArea::Point { x: 10, y: 20 })
        );

        let circle = SubjectArea::from_values(&[10, 20, 30]).expect("three values");
        assert_eq!(
            circle,
            SubjectArea::Circle {
                x: 10,
                y: 20,
                diameter: 30
            }
        );
        assert_eq!(circle.values(), vec![10, 20, 30], "order is kept");
        assert_eq!(circle.center(), (10, 20));

        assert!(matches!(
            SubjectArea::from_values(&[1, 2, 3, 4]),
            Some(SubjectArea::Rectangle { .. })
        ));
    }

    #[test]
    fn other_lengths_are_refused() {
        assert_eq!(SubjectArea::from_values(&[]), None);
        assert_eq!(SubjectArea::from_values(&[1]), None);
        assert_eq!(SubjectArea::from_values(&[1, 2, 3, 4, 5]), None);
    }
}
