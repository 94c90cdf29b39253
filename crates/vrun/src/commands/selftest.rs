//! `test` command: known-answer checks for the key tree and pubkey encoding

use anyhow::{anyhow, bail, Context, Result};
use num_bigint::BigUint;
use vrun_crypto::{derive_child, pubkey_from_privkey, secret_key_from_seed, SecretKey};

/// An EIP-2333 master and child key vector
pub struct TreeVector {
    pub seed: &'static str,
    pub master_sk: &'static str,
    pub child_index: u32,
    pub child_sk: &'static str,
}

/// EIP-2333 test cases 0 to 3
pub const TREE_VECTORS: [TreeVector; 4] = [
    TreeVector {
        seed: "0xc55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
        master_sk: "6083874454709270928345386274498605044986640685124978867557563392430687146096",
        child_index: 0,
        child_sk: "20397789859736650942317412262472558107875392172444076792671091975210932703118",
    },
    TreeVector {
        seed: "0x3141592653589793238462643383279502884197169399375105820974944592",
        master_sk: "29757020647961307431480504535336562678282505419141012933316116377660817309383",
        child_index: 3141592653,
        child_sk: "25457201688850691947727629385191704516744796114925897962676248250929345014287",
    },
    TreeVector {
        seed: "0x0099FF991111002299DD7744EE3355BBDD8844115566CC55663355668888CC00",
        master_sk: "27580842291869792442942448775674722299803720648445448686099262467207037398656",
        child_index: 4294967295,
        child_sk: "29358610794459428860402234341874281240803786294062035874021252734817515685787",
    },
    TreeVector {
        seed: "0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3",
        master_sk: "19022158461524446591288038168518313374041767046816487870552872741050760015818",
        child_index: 42,
        child_sk: "31372231650479070279774297061823572166496564838472787488249775572789064611981",
    },
];

const PUBKEY_PRIVKEY: [u8; 32] = [
    21, 174, 215, 242, 174, 16, 11, 65, 60, 73, 41, 24, 106, 150, 80, 174, 41, 246, 248, 76, 46,
    174, 109, 75, 77, 89, 1, 100, 227, 20, 60, 201,
];

const PUBKEY_EXPECTED: &str = "0x8a0f14c0efe188fbace5b4a72f9e24ce6484b83d2a266837f69f748dafccfdcb12167f5427b7801367a32bf63fdf4783";

fn decimal(digits: &str) -> Result<BigUint> {
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| anyhow!("bad decimal {}", digits))
}

/// Run every check, stopping at the first mismatch
///
/// Returns one report line per passed check.
pub fn execute() -> Result<Vec<String>> {
    let mut report = Vec::new();

    for (i, v) in TREE_VECTORS.iter().enumerate() {
        let seed = hex::decode(v.seed.trim_start_matches("0x"))
            .with_context(|| format!("Test case {} has a malformed seed", i))?;

        let master = secret_key_from_seed(&seed)?;
        let got = master.to_biguint();
        let expected = decimal(v.master_sk)?;
        if got != expected {
            bail!("Test case {} failed: Got {} instead of {}", i, got, expected);
        }

        let child = derive_child(&master, v.child_index)?.to_biguint();
        let expected = decimal(v.child_sk)?;
        if child != expected {
            bail!("Test case {} failed: Got {} instead of {}", i, child, expected);
        }

        report.push(format!("Test case {} passed", i));
    }

    let sk = SecretKey::from_bytes(&PUBKEY_PRIVKEY)?;
    let pubkey = pubkey_from_privkey(&sk)?.to_hex();
    if pubkey != PUBKEY_EXPECTED {
        bail!("Test pubkey failed: Got {} instead of {}", pubkey, PUBKEY_EXPECTED);
    }
    report.push("Test pubkey passed".to_string());

    Ok(report)
}
