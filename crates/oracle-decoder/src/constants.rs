/// Raffle candidate registration, sent to the raffle account by a wallet.
pub const CANDIDATE_REG_OP: u32 = 0x1337_0020;
/// Raffle participant registration, sent to the raffle account by a wallet.
pub const PARTICIPANT_REG_OP: u32 = 0x1337_0030;
/// Standard NFT collection `mint` op-codes; either marks the start of a
/// white-ticket mint subtree.
pub const NFT_MINT_OPS: [u32; 2] = [0x0000_0001, 0x0000_0002];
/// NFT-sale "ticket purchased" notification, sent by a sale/marketplace
/// contract to the item once a purchase settles.
pub const BLACK_PURCHASE_OP: u32 = 0x5fcc_3d14;

/// The only marketplace a black-ticket purchase is trusted from; any other
/// `get_sale_data` / `get_fix_price_data_v4` result is treated as a shape
/// mismatch rather than a valid purchase.
pub const MARKETPLACE_ADDRESS_RAW: &str = "0:584ee61b2dff0837116d0fcb5078d93964bcbe9c05fd6a141b1bfca5d6a43e18";
