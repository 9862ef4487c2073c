/// Unsupervised 2-means clustering over pooled histogram features.
///
/// The two output classes are arbitrary cluster identities, not
/// foreground/background; `true` means "class A" and any semantic
/// mapping is the caller's decision. Initialization is deterministic
/// (farthest-point seeding) so repeated runs agree bit-for-bit.
pub struct KMeansSegmenter {
    max_iterations: usize,
}

impl Default for KMeansSegmenter {
    fn default() -> Self {
        Self { max_iterations: 100 }
    }
}

impl KMeansSegmenter {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Partition the feature vectors into two clusters; `true` = class A.
    ///
    /// Seeds: class A starts at the vector farthest from the pooled
    /// mean, class B at the vector farthest from that seed. Lloyd
    /// iterations then run until assignments stabilize or the iteration
    /// cap is hit. A cluster that empties keeps its previous centroid.
    pub fn cluster(&self, features: &[Vec<f32>]) -> Vec<bool> {
        if features.is_empty() {
            return Vec::new();
        }
        let dims = features[0].len();

        let mean = centroid_of(features.iter(), dims);
        let seed_a = farthest_from(features, &mean);
        let seed_b = farthest_from(features, &features[seed_a]);
        let mut centroid_a = features[seed_a].clone();
        let mut centroid_b = features[seed_b].clone();

        let mut assignment = vec![true; features.len()];
        for iteration in 0..self.max_iterations {
            let mut changed = false;
            for (feature, assigned) in features.iter().zip(assignment.iter_mut()) {
                let to_a = squared_distance(feature, &centroid_a);
                let to_b = squared_distance(feature, &centroid_b);
                let next = to_a <= to_b;
                if next != *assigned {
                    *assigned = next;
                    changed = true;
                }
            }
            if !changed && iteration > 0 {
                break;
            }

            let members_a = features
                .iter()
                .zip(&assignment)
                .filter(|(_, &a)| a)
                .map(|(f, _)| f);
            let members_b = features
                .iter()
                .zip(&assignment)
                .filter(|(_, &a)| !a)
                .map(|(f, _)| f);
            if assignment.iter().any(|&a| a) {
                centroid_a = centroid_of(members_a, dims);
            }
            if assignment.iter().any(|&a| !a) {
                centroid_b = centroid_of(members_b, dims);
            }
        }

        assignment
    }
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

fn centroid_of<'a>(members: impl Iterator<Item = &'a Vec<f32>>, dims: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; dims];
    let mut count = 0usize;
    for member in members {
        for (s, v) in sum.iter_mut().zip(member) {
            *s += v;
        }
        count += 1;
    }
    if count > 0 {
        for s in &mut sum {
            *s /= count as f32;
        }
    }
    sum
}

/// Index of the vector farthest from `from`; ties resolve to the
/// earliest index, which keeps the seeding deterministic.
fn farthest_from(features: &[Vec<f32>], from: &[f32]) -> usize {
    let mut best = 0;
    let mut best_distance = -1.0;
    for (index, feature) in features.iter().enumerate() {
        let distance = squared_distance(feature, from);
        if distance > best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}
