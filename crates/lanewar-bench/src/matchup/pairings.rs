/// Every ordered (side one, side two) pairing of `count` agents, mirrors
/// included, row-major.
pub struct Pairings {
    pairs: Vec<(usize, usize)>,
}

impl Pairings {
    pub fn new(count: usize) -> Self {
        let pairs = (0..count)
            .flat_map(|one| (0..count).map(move |two| (one, two)))
            .collect();
        Self { pairs }
    }

    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
