//! # Decode Context
//!
//! The explicit cursor state threaded through one disassembly pass: current
//! address, accumulated raw bytes of the operation in progress, the overflow
//! flag, and the index-mode state some CPU families need while walking
//! prefixes. Keeping this a plain value makes each decode step independently
//! testable.

/// The result of a fetch or peek operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchResult {
    /// Address the byte was read from
    pub offset: u16,

    /// The read ran past the end of the buffer
    pub overflow: bool,

    /// The byte value (zero on overflow)
    pub opcode: u8,
}

/// Index-register mode selected by a prefix byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexMode {
    #[default]
    None,
    Ix,
    Iy,
}

/// Cursor state for one pass over a byte buffer.
///
/// The cursor is an address; the byte for address `a` lives at buffer index
/// `a - base_address`. The cursor is kept wider than the address space so
/// that walking off the end of a 64K image terminates instead of wrapping
/// back into the buffer.
#[derive(Debug)]
pub struct DecodeContext<'a> {
    memory: &'a [u8],
    base_address: u16,
    offset: u32,
    overflow: bool,
    op_offset: u32,
    bytes: Vec<u8>,

    /// The most recent opcode byte, for operands encoded in the opcode
    pub opcode: u8,

    /// Index-register mode selected while walking prefixes
    pub index_mode: IndexMode,

    /// Displacement byte consumed by an indexed operation
    pub displacement: Option<u8>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(memory: &'a [u8], base_address: u16) -> Self {
        Self {
            memory,
            base_address,
            offset: base_address as u32,
            overflow: false,
            op_offset: base_address as u32,
            bytes: Vec::new(),
            opcode: 0,
            index_mode: IndexMode::None,
            displacement: None,
        }
    }

    /// Move the cursor to `address` and clear the overflow flag
    pub fn seek(&mut self, address: u16) {
        self.offset = address as u32;
        self.overflow = false;
    }

    /// Begin decoding a new operation at the current cursor position
    pub fn begin_operation(&mut self) {
        self.op_offset = self.offset;
        self.bytes.clear();
        self.opcode = 0;
        self.index_mode = IndexMode::None;
        self.displacement = None;
    }

    /// Raw cursor value; exceeds the address space after the buffer end
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Cursor as an address within the 16-bit space
    pub fn address(&self) -> u16 {
        (self.offset & 0xFFFF) as u16
    }

    /// Address of the operation currently being decoded
    pub fn op_address(&self) -> u16 {
        (self.op_offset & 0xFFFF) as u16
    }

    pub fn overflow(&self) -> bool {
        self.overflow
    }

    pub fn memory(&self) -> &[u8] {
        self.memory
    }

    pub fn base_address(&self) -> u16 {
        self.base_address
    }

    fn index_of(&self, offset: u32) -> Option<usize> {
        let index = offset as i64 - self.base_address as i64;
        (0..self.memory.len() as i64).contains(&index).then(|| index as usize)
    }

    /// Fetch the next byte. Past the buffer end, the overflow flag is set
    /// and a zero byte comes back without advancing the cursor.
    pub fn fetch(&mut self) -> u8 {
        match self.index_of(self.offset) {
            Some(index) => {
                let value = self.memory[index];
                self.bytes.push(value);
                self.offset += 1;
                value
            }
            None => {
                self.overflow = true;
                0
            }
        }
    }

    /// Fetch the next little-endian word
    pub fn fetch_word(&mut self) -> u16 {
        let l = self.fetch() as u16;
        let h = self.fetch() as u16;
        (h << 8) | l
    }

    /// Fetch the next big-endian word
    pub fn fetch_word_be(&mut self) -> u16 {
        let h = self.fetch() as u16;
        let l = self.fetch() as u16;
        (h << 8) | l
    }

    /// Fetch a byte, reporting the cursor state alongside the value
    pub fn fetch_result(&mut self) -> FetchResult {
        let opcode = self.fetch();
        FetchResult {
            offset: self.address(),
            overflow: self.overflow,
            opcode,
        }
    }

    /// Non-consuming look at the byte `ahead` positions past the cursor
    pub fn peek(&self, ahead: u32) -> FetchResult {
        let offset = self.offset + ahead;
        match self.index_of(offset) {
            Some(index) => FetchResult {
                offset: (offset & 0xFFFF) as u16,
                overflow: false,
                opcode: self.memory[index],
            },
            None => FetchResult {
                offset: (offset & 0xFFFF) as u16,
                overflow: true,
                opcode: 0,
            },
        }
    }

    /// Take the raw bytes accumulated for the current operation
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}
