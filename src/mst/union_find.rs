//! Disjoint-set forest used by Kruskal's algorithm

/// Union-find over dense u32 keys with path compression and union by rank
pub struct DisjointSets {
    /// Parent pointers; roots point to themselves
    parent: Vec<u32>,

    /// Tree-height bound, maintained only for roots
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create `size` singleton sets
    pub fn new(size: usize) -> Self {
        let mut parent = Vec::with_capacity(size);
        let mut rank = Vec::with_capacity(size);
        for i in 0..size {
            parent.push(i as u32);
            rank.push(0);
        }
        Self { parent, rank }
    }

    /// Find the root of the set containing x, compressing the path
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            let root = self.find(px);
            self.parent[x as usize] = root;
        }
        self.parent[x as usize]
    }

    /// Merge the sets containing x and y; returns false if they were
    /// already joined
    pub fn union(&mut self, x: u32, y: u32) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        // Attach the shallower tree under the deeper one
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];
        if rank_x < rank_y {
            self.parent[root_x as usize] = root_y;
        } else if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
        } else {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += 1;
        }
        true
    }

    /// Whether x and y currently share a set
    pub fn connected(&mut self, x: u32, y: u32) -> bool {
        self.find(x) == self.find(y)
    }
}
