pub const IPFS_SCHEME: &str = "ipfs://";

/// Formats a CID for an OP_RETURN mutable data update. CIDs that already carry
/// the `ipfs://` scheme are passed through.
pub fn to_ipfs_uri(cid: &str) -> String {
    if cid.contains(IPFS_SCHEME) {
        cid.to_string()
    } else {
        format!("{}{}", IPFS_SCHEME, cid)
    }
}
