use crate::pad::model::{Point, Stroke};

/// Completed strokes, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StrokeHistory {
    strokes: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn commit(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.strokes
            .iter()
            .flat_map(|stroke| stroke.points().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_preserves_insertion_order() {
        let mut history = StrokeHistory::default();
        history.commit(Stroke::from(vec![(0, 0), (1, 1)]));
        history.commit(Stroke::from(vec![(5, 5)]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.strokes()[0].first(), Some((0, 0)));
        assert_eq!(history.strokes()[1].first(), Some((5, 5)));
        assert_eq!(
            history.points().collect::<Vec<_>>(),
            vec![(0, 0), (1, 1), (5, 5)]
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut history = StrokeHistory::default();
        history.commit(Stroke::from(vec![(0, 0)]));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.points().count(), 0);
    }
}
