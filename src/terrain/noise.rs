/// Park-Miller linear congruential generator. Only used to shuffle the
/// permutation table, so period and bias hardly matter; determinism for a
/// given seed does.
struct SeededRandom {
    state: i64,
}

impl SeededRandom {
    const MODULUS: i64 = 2_147_483_647;
    const MULTIPLIER: i64 = 16_807;

    fn new(seed: i64) -> Self {
        let mut state = seed % Self::MODULUS;
        if state <= 0 {
            state += Self::MODULUS - 1;
        }
        Self { state }
    }

    /// Next value in [0, 1).
    fn next(&mut self) -> f64 {
        self.state = self.state * Self::MULTIPLIER % Self::MODULUS;
        (self.state - 1) as f64 / (Self::MODULUS - 1) as f64
    }
}

/// Seeded 2D gradient noise over a shuffled 0..=255 permutation table.
/// Instances are fully independent: the same seed always produces the same
/// field, and nothing is shared between generators.
pub struct PerlinNoise {
    permutation: [u8; 512],
}

impl PerlinNoise {
    pub fn new(seed: i64) -> Self {
        let mut table: [u8; 256] = core::array::from_fn(|i| i as u8);
        let mut rand = SeededRandom::new(seed);
        // Fisher-Yates shuffle driven by the seeded generator.
        for i in (1..256usize).rev() {
            let j = (rand.next() * (i + 1) as f64) as usize;
            table.swap(i, j);
        }
        let mut permutation = [0u8; 512];
        for i in 0..512 {
            permutation[i] = table[i & 255];
        }
        Self { permutation }
    }

    /// Continuous noise in roughly [-1, 1], smooth in both arguments.
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor();
        let yi = y.floor();
        let cell_x = (xi as i64 & 255) as usize;
        let cell_y = (yi as i64 & 255) as usize;
        let xf = x - xi;
        let yf = y - yi;

        let p = &self.permutation;
        let bottom_left = p[p[cell_x] as usize + cell_y];
        let bottom_right = p[p[cell_x + 1] as usize + cell_y];
        let top_left = p[p[cell_x] as usize + cell_y + 1];
        let top_right = p[p[cell_x + 1] as usize + cell_y + 1];

        let u = fade(xf);
        let v = fade(yf);

        let x1 = lerp(grad(bottom_left, xf, yf), grad(bottom_right, xf - 1.0, yf), u);
        let x2 = lerp(
            grad(top_left, xf, yf - 1.0),
            grad(top_right, xf - 1.0, yf - 1.0),
            u,
        );
        lerp(x1, x2, v)
    }
}

/// Quintic smoothstep; zero first and second derivatives at the lattice.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Diagonal gradient picked from the low bits of the hashed corner.
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}
