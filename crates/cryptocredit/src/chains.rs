//! Static mapping from user-facing chain symbols to provider chain names.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainCategory {
    Foundational,
    Frontier,
    Community,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    pub symbol: &'static str,
    pub provider_chain: &'static str,
    pub icon_name: &'static str,
    pub category: ChainCategory,
}

const fn chain(
    symbol: &'static str,
    provider_chain: &'static str,
    icon_name: &'static str,
    category: ChainCategory,
) -> ChainInfo {
    ChainInfo {
        symbol,
        provider_chain,
        icon_name,
        category,
    }
}

pub const SUPPORTED_CHAINS: &[ChainInfo] = &[
    chain("ethereum", "eth-mainnet", "eth", ChainCategory::Foundational),
    chain("sepolia", "eth-sepolia", "eth", ChainCategory::Foundational),
    chain("holesky", "eth-holesky", "eth", ChainCategory::Foundational),
    chain("polygon", "matic-mainnet", "matic", ChainCategory::Foundational),
    chain("bsc", "bsc-mainnet", "bsc", ChainCategory::Foundational),
    chain("optimism", "optimism-mainnet", "opt", ChainCategory::Foundational),
    chain("base", "base-mainnet", "base", ChainCategory::Foundational),
    chain("gnosis", "gnosis-mainnet", "gno", ChainCategory::Foundational),
    chain("bitcoin", "btc-mainnet", "btc", ChainCategory::Frontier),
    chain("solana", "solana-mainnet", "sol", ChainCategory::Frontier),
    chain("unichain", "unichain-mainnet", "uni", ChainCategory::Frontier),
    chain("berachain", "berachain-mainnet", "bera", ChainCategory::Frontier),
    chain("apechain", "apechain-mainnet", "ape", ChainCategory::Frontier),
    chain("arbitrum", "arbitrum-mainnet", "arb", ChainCategory::Frontier),
    chain("arbitrum_nova", "arbitrum-nova-mainnet", "arb-nova", ChainCategory::Frontier),
    chain("avalanche", "avalanche-mainnet", "avax", ChainCategory::Frontier),
    chain("axie", "axie-mainnet", "axie", ChainCategory::Frontier),
    chain("boba_bnb", "boba-bnb-mainnet", "boba", ChainCategory::Frontier),
    chain("boba_ethereum", "boba-mainnet", "boba", ChainCategory::Frontier),
    chain("hyperevm", "hyperevm-mainnet", "hyper", ChainCategory::Frontier),
    chain("ink", "ink-mainnet", "ink", ChainCategory::Frontier),
    chain("lens", "lens-mainnet", "lens", ChainCategory::Frontier),
    chain("linea", "linea-mainnet", "linea", ChainCategory::Frontier),
    chain("mantle", "mantle-mainnet", "mantle", ChainCategory::Frontier),
    chain("oasis_sapphire", "oasis-sapphire-mainnet", "oasis", ChainCategory::Frontier),
    chain("palm", "palm-mainnet", "palm", ChainCategory::Frontier),
    chain("scroll", "scroll-mainnet", "scroll", ChainCategory::Frontier),
    chain("sei", "sei-mainnet", "sei", ChainCategory::Frontier),
    chain("taiko", "taiko-mainnet", "taiko", ChainCategory::Frontier),
    chain("viction", "viction-mainnet", "viction", ChainCategory::Frontier),
    chain("world", "world-mainnet", "world", ChainCategory::Frontier),
    chain("zksync", "zksync-mainnet", "zksync", ChainCategory::Frontier),
    chain("zora", "zora-mainnet", "zora", ChainCategory::Frontier),
    chain("aurora", "aurora-mainnet", "aurora", ChainCategory::Community),
    chain("avalanche_beam", "avalanche-beam-mainnet", "beam", ChainCategory::Community),
    chain("avalanche_dexalot", "avalanche-dexalot-mainnet", "dexalot", ChainCategory::Community),
    chain("avalanche_meld", "avalanche-meld-mainnet", "meld", ChainCategory::Community),
    chain("avalanche_numbers", "avalanche-numbers", "numbers", ChainCategory::Community),
    chain("avalanche_shrapnel", "avalanche-shrapnel-mainnet", "shrapnel", ChainCategory::Community),
    chain("avalanche_step_network", "avalanche-step-network", "step", ChainCategory::Community),
    chain("avalanche_uptn", "avalanche-uptn", "uptn", ChainCategory::Community),
    chain("avalanche_xanachain", "avalanche-xanachain", "xana", ChainCategory::Community),
    chain("blast", "blast-mainnet", "blast", ChainCategory::Community),
    chain("bnb_opbnb", "bnb-opbnb-mainnet", "opbnb", ChainCategory::Community),
    chain("canto", "canto-mainnet", "canto", ChainCategory::Community),
    chain("celo", "celo-mainnet", "celo", ChainCategory::Community),
    chain("covalent", "covalent-internal-network-v1", "covalent", ChainCategory::Community),
    chain("cronos", "cronos-mainnet", "cronos", ChainCategory::Community),
    chain("cronos_zkevm", "cronos-zkevm-mainnet", "zkevm", ChainCategory::Community),
    chain("defi_kingdoms", "defi-kingdoms-mainnet", "dfk", ChainCategory::Community),
    chain("emerald_paratime", "emerald-paratime-mainnet", "oasis", ChainCategory::Community),
    chain("fantom", "fantom-mainnet", "ftm", ChainCategory::Community),
    chain("fraxtal", "fraxtal-mainnet", "frax", ChainCategory::Community),
    chain("horizen_eon", "horizen-eon-mainnet", "eon", ChainCategory::Community),
    chain("merlin", "merlin-mainnet", "merlin", ChainCategory::Community),
    chain("metis", "metis-mainnet", "metis", ChainCategory::Community),
    chain("moonbeam", "moonbeam-mainnet", "moonbeam", ChainCategory::Community),
    chain("moonriver", "moonriver-mainnet", "moonriver", ChainCategory::Community),
    chain("polygon_zkevm", "polygon-zkevm-mainnet", "zkevm", ChainCategory::Community),
    chain("redstone", "redstone-mainnet", "redstone", ChainCategory::Community),
    chain("rollux", "rollux-mainnet", "rollux", ChainCategory::Community),
    chain("sx", "sx-mainnet", "sx", ChainCategory::Community),
    chain("x1", "x1-mainnet", "x1", ChainCategory::Community),
    chain("zetachain", "zetachain-mainnet", "zeta", ChainCategory::Community),
    chain("dos", "avalanche-dos", "dos", ChainCategory::Archived),
    chain("fncy", "bnb-fncy-mainnet", "fncy", ChainCategory::Archived),
    chain("evmos", "evmos-mainnet", "evmos", ChainCategory::Archived),
    chain("songbird", "flarenetworks-canary-mainnet", "songbird", ChainCategory::Archived),
    chain("harmony", "harmony-mainnet", "harmony", ChainCategory::Archived),
    chain("lisk", "lisk-mainnet", "lisk", ChainCategory::Archived),
    chain("loot", "loot-mainnet", "loot", ChainCategory::Archived),
    chain("meter", "meter-mainnet", "meter", ChainCategory::Archived),
    chain("milkomeda_c1", "milkomeda-c1-mainnet", "milkomeda", ChainCategory::Archived),
    chain("mode", "mode-mainnet", "mode", ChainCategory::Archived),
    chain("telos", "telos-mainnet", "telos", ChainCategory::Archived),
    chain("ultron", "ultron-mainnet", "ultron", ChainCategory::Archived),
];

/// Resolves a chain symbol (`ethereum`) or a provider name (`eth-mainnet`),
/// case-insensitively.
pub fn resolve(chain: &str) -> Option<&'static ChainInfo> {
    let wanted = chain.trim();
    SUPPORTED_CHAINS.iter().find(|info| {
        info.symbol.eq_ignore_ascii_case(wanted) || info.provider_chain.eq_ignore_ascii_case(wanted)
    })
}
