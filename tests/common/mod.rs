/// Packs values most significant bit first, the way card records are laid out.
#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: u64, bits: usize) -> &mut Self {
        for i in (0..bits).rev() {
            if self.len % 8 == 0 {
                self.bytes.push(0);
            }
            if (value >> i) & 1 == 1 {
                let last = self.bytes.len() - 1;
                self.bytes[last] |= 0x80 >> (self.len % 8);
            }
            self.len += 1;
        }
        self
    }

    #[allow(dead_code)]
    pub fn bit_len(&self) -> usize {
        self.len
    }

    /// Bytes written so far, zero padded to a whole byte.
    pub fn finish(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
