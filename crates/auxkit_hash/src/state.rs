//! SipHash-2-4 internal state.

/// Compression rounds per message block.
const C_ROUNDS: usize = 2;
/// Finalization rounds.
const D_ROUNDS: usize = 4;

/// Working state of one SipHash computation.
///
/// Owned by a single computation and dropped with it; nothing survives
/// between digests.
#[derive(Debug, Clone)]
pub(crate) struct State {
    v0: u64,
    v1: u64,
    v2: u64,
    v3: u64,
    /// Unprocessed input bytes, packed little-endian.
    tail: u64,
    /// Number of valid bytes in `tail` (0..=7).
    ntail: usize,
    /// Total bytes consumed. Only the low byte reaches the digest.
    length: u64,
}

impl State {
    pub(crate) fn new(k0: u64, k1: u64) -> Self {
        Self {
            v0: k0 ^ 0x736f_6d65_7073_6575,
            v1: k1 ^ 0x646f_7261_6e64_6f6d,
            v2: k0 ^ 0x6c79_6765_6e65_7261,
            v3: k1 ^ 0x7465_6462_7974_6573,
            tail: 0,
            ntail: 0,
            length: 0,
        }
    }

    #[inline]
    fn sip_round(&mut self) {
        self.v0 = self.v0.wrapping_add(self.v1);
        self.v2 = self.v2.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(13);
        self.v3 = self.v3.rotate_left(16);
        self.v1 ^= self.v0;
        self.v3 ^= self.v2;
        self.v0 = self.v0.rotate_left(32);

        self.v2 = self.v2.wrapping_add(self.v1);
        self.v0 = self.v0.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(17);
        self.v3 = self.v3.rotate_left(21);
        self.v1 ^= self.v2;
        self.v3 ^= self.v0;
        self.v2 = self.v2.rotate_left(32);
    }

    #[inline]
    fn compress(&mut self, m: u64) {
        self.v3 ^= m;
        for _ in 0..C_ROUNDS {
            self.sip_round();
        }
        self.v0 ^= m;
    }

    /// Feeds more input. May be called any number of times.
    pub(crate) fn update(&mut self, mut input: &[u8]) {
        self.length = self.length.wrapping_add(input.len() as u64);

        if self.ntail != 0 {
            let needed = 8 - self.ntail;
            let take = needed.min(input.len());
            self.tail |= load_partial(&input[..take]) << (8 * self.ntail);
            self.ntail += take;
            input = &input[take..];

            if self.ntail < 8 {
                return;
            }
            let m = self.tail;
            self.compress(m);
            self.tail = 0;
            self.ntail = 0;
        }

        let mut blocks = input.chunks_exact(8);
        for block in &mut blocks {
            let mut word = [0u8; 8];
            word.copy_from_slice(block);
            self.compress(u64::from_le_bytes(word));
        }

        let rest = blocks.remainder();
        self.tail = load_partial(rest);
        self.ntail = rest.len();
    }

    /// Pads the last block, runs finalization and returns the 64-bit result.
    pub(crate) fn finish(mut self) -> u64 {
        let b = ((self.length & 0xff) << 56) | self.tail;
        self.compress(b);

        self.v2 ^= 0xff;
        for _ in 0..D_ROUNDS {
            self.sip_round();
        }

        self.v0 ^ self.v1 ^ self.v2 ^ self.v3
    }
}

/// Loads up to 7 bytes as a little-endian integer.
#[inline]
fn load_partial(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() < 8);
    bytes
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
}
