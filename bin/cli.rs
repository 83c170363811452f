//! CLI tool for deploying and interacting with the payout distributor contracts.

use payout_contracts::distributor::payout_distributor::PayoutDistributor;
use payout_contracts::token::RewardToken;
use odra::casper_types::U256;
use odra::prelude::Address;
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the reward token contract.
pub struct RewardTokenDeployScript;

impl DeployScript for RewardTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use payout_contracts::token::RewardTokenInitArgs;

        let _token = RewardToken::load_or_deploy(
            &env,
            RewardTokenInitArgs {
                name: String::from("Reward Token"),
                symbol: String::from("RWD"),
                decimals: 9,
            },
            container,
            300_000_000_000 // Gas limit for token deployment
        )?;

        Ok(())
    }
}

/// Deploys the payout distributor contract.
/// The deploying account becomes the distributor.
pub struct PayoutDistributorDeployScript;

impl DeployScript for PayoutDistributorDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use payout_contracts::distributor::payout_distributor::PayoutDistributorInitArgs;

        let caller = env.caller();
        let _payout = PayoutDistributor::load_or_deploy(
            &env,
            PayoutDistributorInitArgs {
                distributor: caller,
            },
            container,
            500_000_000_000 // Gas limit for distributor deployment
        )?;

        Ok(())
    }
}

/// Deploys the complete payout system (token + distributor).
pub struct PayoutSystemDeployScript;

impl DeployScript for PayoutSystemDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        // Deploy the reward token first
        RewardTokenDeployScript.deploy(env, container)?;

        // Then deploy the distributor
        PayoutDistributorDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to settle a native reward watermark for a recipient.
pub struct SettleNativeScenario;

impl Scenario for SettleNativeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "recipient",
                "Address of the reward recipient",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "total_reward",
                "Cumulative native amount owed so far, in motes",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut payout = container.contract_ref::<PayoutDistributor>(env)?;
        let recipient = args.get_single::<Address>("recipient")?;
        let total_reward = args.get_single::<U256>("total_reward")?;

        env.set_gas(300_000_000_000);
        payout.try_settle_native(recipient, total_reward)?;

        println!("Reward settled successfully!");
        Ok(())
    }
}

impl ScenarioMetadata for SettleNativeScenario {
    const NAME: &'static str = "settle-native";
    const DESCRIPTION: &'static str = "Settles the cumulative native reward for a recipient";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the Casper payout distributor contracts")
        // Deploy scripts
        .deploy(RewardTokenDeployScript)
        .deploy(PayoutDistributorDeployScript)
        .deploy(PayoutSystemDeployScript)
        // Contract references
        .contract::<PayoutDistributor>()
        .contract::<RewardToken>()
        // Scenarios
        .scenario(SettleNativeScenario)
        .build()
        .run();
}
