pub const TCP_LENGTH_RANGE: std::ops::Range<usize> = 0..2;
pub const TCP_PREFIX_LEN: usize = 2;

pub const ID_RANGE: std::ops::Range<usize> = 0..2;
pub const FLAG1_OFFSET: usize = 2;
pub const FLAG2_OFFSET: usize = 3;
pub const QDCOUNT_RANGE: std::ops::Range<usize> = 4..6;
pub const ANCOUNT_RANGE: std::ops::Range<usize> = 6..8;
pub const NSCOUNT_RANGE: std::ops::Range<usize> = 8..10;
pub const ARCOUNT_RANGE: std::ops::Range<usize> = 10..12;
pub const HEADER_LEN: usize = 12;

// First flags byte.
pub const QR_FLAG: u8 = 1 << 7;
pub const OPCODE_MASK: u8 = 0x78;
pub const OPCODE_SHIFT: u32 = 3;
pub const AA_FLAG: u8 = 1 << 2;
pub const TC_FLAG: u8 = 1 << 1;
pub const RD_FLAG: u8 = 1 << 0;

// Second flags byte.
pub const RA_FLAG: u8 = 1 << 7;
pub const RCODE_MASK: u8 = 0x0F;

pub const LABEL_KIND_MASK: u8 = 0xC0;
pub const NAME_TERMINATOR: u8 = 0x00;
pub const QTYPE_LEN: usize = 2;
pub const QCLASS_LEN: usize = 2;
