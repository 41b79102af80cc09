//! Seed data restored by `reset` and used on first access of an empty
//! local store.

use super::{Category, Post};

/// The three original SYSTEM_LOG entries.
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: "LOG_001".to_string(),
            title: "The Convergence of AI Agents and Smart Contracts".to_string(),
            date: "2024.05.12".to_string(),
            category: Category::AiWeb3,
            author: "ROOT_ADMIN".to_string(),
            read_time: "5 MIN".to_string(),
            preview: "Autonomous agents are no longer just chat interfaces. By giving them wallet addresses, we are witnessing the birth of an automated economy...".to_string(),
            content: r#"# SYSTEM_LOG: AI_AGENTS_V2
# TIMESTAMP: 2024.05.12 :: 04:23 UTC
# ENCRYPTION: AES-256

The intersection of Generative AI and Blockchain technology is creating a new paradigm: "Autonomous Economic Agents".

Traditionally, smart contracts are passive code. They wait for an external trigger. AI Agents, however, are proactive. They can analyze market data, make decisions, and execute transactions on-chain without human intervention.

## KEY DEVELOPMENTS:
1. **Wallet Abstraction**: Agents now possess secure multi-sig wallets.
2. **Oracles**: LLMs are acting as reasoning engines for on-chain data.
3. **Governance**: DAOs are experimenting with AI delegates for voting.

At Chainfind, we are developing the "Neural-Chain Bridge", a protocol allowing L2 networks to verify AI inference results. This ensures that when an agent executes a trade, the logic behind it is verifiable.

[END_OF_LOG]"#.to_string(),
        },
        Post {
            id: "LOG_002".to_string(),
            title: "Zero-Knowledge Proofs in Enterprise Privacy".to_string(),
            date: "2024.04.28".to_string(),
            category: Category::Cryptography,
            author: "SEC_OPS".to_string(),
            read_time: "8 MIN".to_string(),
            preview: "Enterprises need privacy, blockchains are public. ZK-Proofs solve this paradox by proving truth without revealing the underlying data...".to_string(),
            content: r#"# SYSTEM_LOG: ZK_RESEARCH
# STATUS: DECLASSIFIED

Public blockchains offer transparency, but enterprises require confidentiality. Zero-Knowledge Proofs (ZKPs) are the mathematical magic solving this contradiction.

## USE CASE: SUPPLY CHAIN
Imagine a luxury goods manufacturer wants to prove a bag is authentic without revealing their entire supplier list to competitors.

- **Traditional Blockchain**: All data is public.
- **ZK-Rollup**: The manufacturer generates a "proof" that the item moved through the verified supply chain. The public ledger verifies the proof, but the supplier identities remain hidden.

Chainfind's implementation of ZK-SNARKs reduces gas costs by 90% while maintaining GDPR compliance for our European clients.

[END_OF_LOG]"#.to_string(),
        },
        Post {
            id: "LOG_003".to_string(),
            title: "Vulnerability Report: Reentrancy in DeFi Protocols".to_string(),
            date: "2024.03.15".to_string(),
            category: Category::SecurityAudit,
            author: "WHITE_HAT".to_string(),
            read_time: "12 MIN".to_string(),
            preview: "Despite being a known vector since 2016, reentrancy attacks continue to drain millions. Here is how our automated scanner detects them...".to_string(),
            content: r#"# INCIDENT_REPORT: REENTRANCY
# SEVERITY: CRITICAL

A reentrancy attack occurs when a function makes an external call to an untrusted contract before it resolves its own state change. This allows the attacker to recursively call the original function, draining funds.

## CODE ANALYSIS:
```solidity
// VULNERABLE CODE
function withdraw() public {
    uint bal = balances[msg.sender];
    require(bal > 0);
    (bool sent, ) = msg.sender.call{value: bal}(""); // <--- ATTACK VECTOR
    require(sent, "Failed to send Ether");
    balances[msg.sender] = 0;
}
```

## REMEDIATION:
1. **Checks-Effects-Interactions Pattern**: Update state *before* making external calls.
2. **ReentrancyGuard**: Use OpenZeppelin's modifiers.

Our "Chainfind Sentinel" tool now automatically flags this pattern during CI/CD pipelines.

[END_OF_LOG]"#.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_three_unique_logs() {
        let posts = seed_posts();
        assert_eq!(posts.len(), 3);
        let mut ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, vec!["LOG_001", "LOG_002", "LOG_003"]);
    }
}
