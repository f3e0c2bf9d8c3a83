//! Legal topics and their static background blurbs.
//! The blurb table is compiled in and never changes at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five legal subject areas the guide answers questions about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    TenantDisputes,
    SalaryIssues,
    FirProcess,
    Loans,
    Inheritance,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::TenantDisputes,
        Topic::SalaryIssues,
        Topic::FirProcess,
        Topic::Loans,
        Topic::Inheritance,
    ];

    /// Wire id, e.g. `tenant-disputes`.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::TenantDisputes => "tenant-disputes",
            Topic::SalaryIssues => "salary-issues",
            Topic::FirProcess => "fir-process",
            Topic::Loans => "loans",
            Topic::Inheritance => "inheritance",
        }
    }

    /// Background on the Pakistani statutes that govern this topic. Fed into the system prompt.
    pub fn legal_context(self) -> &'static str {
        match self {
            Topic::TenantDisputes => TENANT_DISPUTES_CONTEXT,
            Topic::SalaryIssues => SALARY_ISSUES_CONTEXT,
            Topic::FirProcess => FIR_PROCESS_CONTEXT,
            Topic::Loans => LOANS_CONTEXT,
            Topic::Inheritance => INHERITANCE_CONTEXT,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a topic id is not one of the five known ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

const TENANT_DISPUTES_CONTEXT: &str = "Pakistan has specific tenant protection laws under the Provincial Tenancy Laws. \
Key areas: Security deposit regulations, eviction procedures, repair obligations, \
rent increase limits, notice periods (usually 30 days for monthly tenancies).";

const SALARY_ISSUES_CONTEXT: &str = "Pakistan's employment law is governed by the Employment Ordinance, 1968 and the \
Workers' Compensation Act. Key areas: Minimum wage, overtime pay, benefits, gratuity, \
wrongful termination, dispute resolution through labor courts.";

const FIR_PROCESS_CONTEXT: &str = "FIR (First Information Report) is the formal registration of a crime with police in Pakistan. \
Governed by Pakistan Penal Code and Code of Criminal Procedure, 1898. \
Key areas: Who can file, where to file, charges of false reporting, investigation stages, \
bail procedures.";

const LOANS_CONTEXT: &str = "Loan regulations in Pakistan fall under the Dawood's Banking Law and the Protection \
of Economic Interests Act. Key areas: Interest limits, defaulter's rights, recovery procedures, \
collateral law, secured vs unsecured loans, debt settlement options.";

const INHERITANCE_CONTEXT: &str = "Islamic Law governs inheritance in Pakistan (with secular alternatives for minorities). \
Governed by the Succession Act, 1925 and Quran for Muslims. \
Key areas: Legal heirs distribution, Will requirements, immovable property succession, \
dispute resolution, guardian and ward cases.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_id() {
        for topic in Topic::ALL {
            assert_eq!(topic.as_str().parse::<Topic>(), Ok(topic));
        }
    }

    #[test]
    fn rejects_unknown_id() {
        assert_eq!(
            "not-a-real-topic".parse::<Topic>(),
            Err(UnknownTopic("not-a-real-topic".to_string()))
        );
        // Ids are case-sensitive on the wire.
        assert!("Loans".parse::<Topic>().is_err());
    }

    #[test]
    fn serde_uses_kebab_ids() {
        let json = serde_json::to_string(&Topic::FirProcess).unwrap();
        assert_eq!(json, "\"fir-process\"");
        let back: Topic = serde_json::from_str("\"salary-issues\"").unwrap();
        assert_eq!(back, Topic::SalaryIssues);
    }

    #[test]
    fn every_topic_has_context() {
        for topic in Topic::ALL {
            assert!(!topic.legal_context().trim().is_empty(), "{topic} has no context");
        }
        assert!(Topic::FirProcess
            .legal_context()
            .contains("Code of Criminal Procedure, 1898"));
    }
}
