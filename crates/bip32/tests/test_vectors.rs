//! BIP32 official test vectors, checked against raw key/chain-code bytes
//! rather than base58 xprv/xpub strings (this crate does not implement
//! base58 extended-key encoding).

use hd_bip32::{ChildNumber, ExtendedPrivateKey};

fn hex32(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

/// BIP32 test vector 1, seed `000102030405060708090a0b0c0d0e0f`.
mod test_vector_1 {
    use super::*;

    fn seed() -> Vec<u8> {
        hex32("000102030405060708090a0b0c0d0e0f")
    }

    #[test]
    fn master() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        assert_eq!(master.depth(), 0);
        assert_eq!(master.parent_fingerprint(), &[0, 0, 0, 0]);
        assert_eq!(master.child_number(), 0);
        assert_eq!(
            master.private_key().to_bytes().as_slice(),
            hex32("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35").as_slice()
        );
        assert_eq!(
            master.chain_code().as_bytes().as_slice(),
            hex32("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508").as_slice()
        );
        assert_eq!(master.fingerprint(), hex32("3442193e").as_slice());
    }

    #[test]
    fn m_0h() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        let m0h = master.derive_child(ChildNumber::Hardened(0)).unwrap();
        assert_eq!(m0h.depth(), 1);
        assert_eq!(m0h.child_number(), 0x8000_0000);
        assert_eq!(m0h.parent_fingerprint(), &master.fingerprint());

        let pubkey = m0h.to_extended_public_key();
        assert_eq!(
            pubkey.public_key().to_bytes().as_slice(),
            hex32("035a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56").as_slice()
        );
    }

    #[test]
    fn m_0h_1() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        let m0h = master.derive_child(ChildNumber::Hardened(0)).unwrap();
        let m0h1 = m0h.derive_child(ChildNumber::Normal(1)).unwrap();
        assert_eq!(m0h1.depth(), 2);

        let pubkey = m0h1.to_extended_public_key();
        assert_eq!(
            pubkey.public_key().to_bytes().as_slice(),
            hex32("03501e454bf00751f24b1b489aa925215d66af2234e3891c3b21a52bedb3cd711").as_slice()
        );
    }

    #[test]
    fn m_0h_1_2h() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        let key = master
            .derive_child(ChildNumber::Hardened(0))
            .unwrap()
            .derive_child(ChildNumber::Normal(1))
            .unwrap()
            .derive_child(ChildNumber::Hardened(2))
            .unwrap();
        assert_eq!(key.depth(), 3);

        let pubkey = key.to_extended_public_key();
        assert_eq!(
            pubkey.public_key().to_bytes().as_slice(),
            hex32("0357bfe1e341d01c69fe5654309956cbea516822fba8a601743a012a7896ee8dc").as_slice()
        );
    }

    #[test]
    fn m_0h_1_2h_2() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        let key = master
            .derive_child(ChildNumber::Hardened(0))
            .unwrap()
            .derive_child(ChildNumber::Normal(1))
            .unwrap()
            .derive_child(ChildNumber::Hardened(2))
            .unwrap()
            .derive_child(ChildNumber::Normal(2))
            .unwrap();
        assert_eq!(key.depth(), 4);

        let pubkey = key.to_extended_public_key();
        assert_eq!(
            pubkey.public_key().to_bytes().as_slice(),
            hex32("02e8445082a72f29b75ca48748a914df60622a609cacfce8ed0e35804560741d29").as_slice()
        );
    }

    #[test]
    fn m_0h_1_2h_2_1000000000() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        let key = master
            .derive_child(ChildNumber::Hardened(0))
            .unwrap()
            .derive_child(ChildNumber::Normal(1))
            .unwrap()
            .derive_child(ChildNumber::Hardened(2))
            .unwrap()
            .derive_child(ChildNumber::Normal(2))
            .unwrap()
            .derive_child(ChildNumber::Normal(1_000_000_000))
            .unwrap();
        assert_eq!(key.depth(), 5);

        let pubkey = key.to_extended_public_key();
        assert_eq!(
            pubkey.public_key().to_bytes().as_slice(),
            hex32("022a471424da5e657499d2ff819ea22b1c87819f80bdb01a4e6a39de8c456a7db").as_slice()
        );
    }
}

/// BIP32 test vector 2, a longer seed exercising larger child indices.
mod test_vector_2 {
    use super::*;

    fn seed() -> Vec<u8> {
        hex32(
            "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aea7a4a1a9e9b9895928f8c8986838077746e6b",
        )
    }

    #[test]
    fn master_fingerprint() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        assert_eq!(master.fingerprint(), hex32("bd16bee5").as_slice());
    }

    #[test]
    fn max_normal_index_is_normal() {
        let master = ExtendedPrivateKey::from_seed(&seed()).unwrap();
        let child = master.derive_child(ChildNumber::Normal(0x7FFF_FFFF)).unwrap();
        assert!(!ChildNumber::from_index(child.child_number()).is_hardened());
    }
}

#[test]
fn depth_overflow_after_255_derivations_is_rejected() {
    let mut key = ExtendedPrivateKey::from_seed(&[0xCCu8; 32]).unwrap();
    let mut bytes = key.to_extkey_bytes();
    bytes[0] = 255;
    key = ExtendedPrivateKey::from_extkey_bytes(&bytes).unwrap();
    assert!(key.derive_child(ChildNumber::Normal(0)).is_err());
}

#[test]
fn hardened_derivation_unavailable_from_public_key() {
    let master = ExtendedPrivateKey::from_seed(&[0xDDu8; 32]).unwrap();
    let master_pub = master.to_extended_public_key();
    assert!(master_pub.derive_child(ChildNumber::Hardened(0)).is_err());
}
