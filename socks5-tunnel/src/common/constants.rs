pub const SOCKS_VER_5: u8 = 0x05u8;

pub const SOCKS_AUTH_VER: u8 = 0x01u8;
pub const SOCKS_AUTH_USERNAME_PASSWORD: u8 = 0x02u8;
pub const SOCKS_AUTH_NO_ACCEPTABLE_METHODS: u8 = 0xFFu8;
pub const SOCKS_AUTH_SUCCESS: u8 = 0x00u8;

pub const SOCKS_CMD_CONNECT: u8 = 0x01u8;

pub const SOCKS_RSV: u8 = 0x00u8;

pub const SOCKS_ATYP_IPV4: u8 = 0x01u8;

pub const SOCKS_REP_SUCCEEDED: u8 = 0x00u8;

/// Greeting and authentication replies are both two bytes.
pub const SOCKS_SHORT_REPLY_LEN: usize = 2;

/// CONNECT reply with an IPv4 bound address.
pub const SOCKS_CONNECT_REPLY_LEN: usize = 10;

/// Longest username or password the one-byte length field can carry.
pub const SOCKS_MAX_CREDENTIAL_LEN: usize = 0xFF;
