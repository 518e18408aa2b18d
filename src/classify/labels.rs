use thiserror::Error;

/// Errors raised by the label codec
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelCodecError {
    /// Label name is not part of the closed label space
    #[error("Unknown label name: {0}")]
    UnknownName(String),

    /// Label id is not part of the closed label space
    #[error("Unknown label id: {0}")]
    UnknownId(u32),
}

/// The closed set of clause categories the classifier model was trained on.
///
/// The variant order is the lexicographic order of the label names, which is
/// exactly the order the training-time label encoder assigned integer ids in.
/// Adding, removing, or reordering variants breaks compatibility with the
/// deployed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ClauseLabel {
    AffiliateLicenseLicensee,
    AffiliateLicenseLicensor,
    AgreementDate,
    AntiAssignment,
    AuditRights,
    CapOnLiability,
    ChangeOfControl,
    CompetitiveRestrictionException,
    Confidentiality,
    CovenantNotToSue,
    DisputeResolution,
    DocumentName,
    EffectiveDate,
    Exclusivity,
    ExpirationDate,
    ForceMajeure,
    GoverningLaw,
    IpOwnershipAssignment,
    Indemnification,
    Insurance,
    IrrevocableOrPerpetualLicense,
    JointIpOwnership,
    LicenseGrant,
    LiquidatedDamages,
    MinimumCommitment,
    MostFavoredNation,
    NoSolicitOfCustomers,
    NoSolicitOfEmployees,
    NonCompete,
    NonDisparagement,
    NonTransferableLicense,
    NoticePeriodToTerminateRenewal,
    Parties,
    PaymentTerms,
    PostTerminationServices,
    PriceRestrictions,
    RenewalTerm,
    RevenueProfitSharing,
    RofrRofoRofn,
    Severability,
    SourceCodeEscrow,
    TerminationForConvenience,
    ThirdPartyBeneficiary,
    UncappedLiability,
    UnlimitedLicense,
    VolumeRestriction,
    WarrantyDuration,
}

impl ClauseLabel {
    /// All labels, in id order
    pub const ALL: [ClauseLabel; 47] = [
        ClauseLabel::AffiliateLicenseLicensee,
        ClauseLabel::AffiliateLicenseLicensor,
        ClauseLabel::AgreementDate,
        ClauseLabel::AntiAssignment,
        ClauseLabel::AuditRights,
        ClauseLabel::CapOnLiability,
        ClauseLabel::ChangeOfControl,
        ClauseLabel::CompetitiveRestrictionException,
        ClauseLabel::Confidentiality,
        ClauseLabel::CovenantNotToSue,
        ClauseLabel::DisputeResolution,
        ClauseLabel::DocumentName,
        ClauseLabel::EffectiveDate,
        ClauseLabel::Exclusivity,
        ClauseLabel::ExpirationDate,
        ClauseLabel::ForceMajeure,
        ClauseLabel::GoverningLaw,
        ClauseLabel::IpOwnershipAssignment,
        ClauseLabel::Indemnification,
        ClauseLabel::Insurance,
        ClauseLabel::IrrevocableOrPerpetualLicense,
        ClauseLabel::JointIpOwnership,
        ClauseLabel::LicenseGrant,
        ClauseLabel::LiquidatedDamages,
        ClauseLabel::MinimumCommitment,
        ClauseLabel::MostFavoredNation,
        ClauseLabel::NoSolicitOfCustomers,
        ClauseLabel::NoSolicitOfEmployees,
        ClauseLabel::NonCompete,
        ClauseLabel::NonDisparagement,
        ClauseLabel::NonTransferableLicense,
        ClauseLabel::NoticePeriodToTerminateRenewal,
        ClauseLabel::Parties,
        ClauseLabel::PaymentTerms,
        ClauseLabel::PostTerminationServices,
        ClauseLabel::PriceRestrictions,
        ClauseLabel::RenewalTerm,
        ClauseLabel::RevenueProfitSharing,
        ClauseLabel::RofrRofoRofn,
        ClauseLabel::Severability,
        ClauseLabel::SourceCodeEscrow,
        ClauseLabel::TerminationForConvenience,
        ClauseLabel::ThirdPartyBeneficiary,
        ClauseLabel::UncappedLiability,
        ClauseLabel::UnlimitedLicense,
        ClauseLabel::VolumeRestriction,
        ClauseLabel::WarrantyDuration,
    ];

    /// The label name as it appears in the training data and the tier table
    pub fn name(self) -> &'static str {
        match self {
            ClauseLabel::AffiliateLicenseLicensee => "Affiliate License-Licensee",
            ClauseLabel::AffiliateLicenseLicensor => "Affiliate License-Licensor",
            ClauseLabel::AgreementDate => "Agreement Date",
            ClauseLabel::AntiAssignment => "Anti-Assignment",
            ClauseLabel::AuditRights => "Audit Rights",
            ClauseLabel::CapOnLiability => "Cap On Liability",
            ClauseLabel::ChangeOfControl => "Change Of Control",
            ClauseLabel::CompetitiveRestrictionException => "Competitive Restriction Exception",
            ClauseLabel::Confidentiality => "Confidentiality",
            ClauseLabel::CovenantNotToSue => "Covenant Not To Sue",
            ClauseLabel::DisputeResolution => "Dispute Resolution",
            ClauseLabel::DocumentName => "Document Name",
            ClauseLabel::EffectiveDate => "Effective Date",
            ClauseLabel::Exclusivity => "Exclusivity",
            ClauseLabel::ExpirationDate => "Expiration Date",
            ClauseLabel::ForceMajeure => "Force Majeure",
            ClauseLabel::GoverningLaw => "Governing Law",
            ClauseLabel::IpOwnershipAssignment => "IP Ownership Assignment",
            ClauseLabel::Indemnification => "Indemnification",
            ClauseLabel::Insurance => "Insurance",
            ClauseLabel::IrrevocableOrPerpetualLicense => "Irrevocable Or Perpetual License",
            ClauseLabel::JointIpOwnership => "Joint IP Ownership",
            ClauseLabel::LicenseGrant => "License Grant",
            ClauseLabel::LiquidatedDamages => "Liquidated Damages",
            ClauseLabel::MinimumCommitment => "Minimum Commitment",
            ClauseLabel::MostFavoredNation => "Most Favored Nation",
            ClauseLabel::NoSolicitOfCustomers => "No-Solicit Of Customers",
            ClauseLabel::NoSolicitOfEmployees => "No-Solicit Of Employees",
            ClauseLabel::NonCompete => "Non-Compete",
            ClauseLabel::NonDisparagement => "Non-Disparagement",
            ClauseLabel::NonTransferableLicense => "Non-Transferable License",
            ClauseLabel::NoticePeriodToTerminateRenewal => "Notice Period To Terminate Renewal",
            ClauseLabel::Parties => "Parties",
            ClauseLabel::PaymentTerms => "Payment Terms",
            ClauseLabel::PostTerminationServices => "Post-Termination Services",
            ClauseLabel::PriceRestrictions => "Price Restrictions",
            ClauseLabel::RenewalTerm => "Renewal Term",
            ClauseLabel::RevenueProfitSharing => "Revenue/Profit Sharing",
            ClauseLabel::RofrRofoRofn => "Rofr/Rofo/Rofn",
            ClauseLabel::Severability => "Severability",
            ClauseLabel::SourceCodeEscrow => "Source Code Escrow",
            ClauseLabel::TerminationForConvenience => "Termination For Convenience",
            ClauseLabel::ThirdPartyBeneficiary => "Third Party Beneficiary",
            ClauseLabel::UncappedLiability => "Uncapped Liability",
            ClauseLabel::UnlimitedLicense => "Unlimited/All-You-Can-Eat-License",
            ClauseLabel::VolumeRestriction => "Volume Restriction",
            ClauseLabel::WarrantyDuration => "Warranty Duration",
        }
    }

    /// The integer id the label encoder assigned this label
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Look a label up by its integer id
    pub fn from_id(id: u32) -> Option<ClauseLabel> {
        Self::ALL.get(id as usize).copied()
    }
}

/// Bijective, order-preserving mapping between the finite label-name list and
/// the equivalent integer ids.
///
/// `decode` is the exact inverse of `encode` over the whole domain:
/// `decode(encode(name)) == name` for every label name.
#[derive(Debug, Clone, Default)]
pub struct LabelCodec;

impl LabelCodec {
    /// Create a codec over the full label space
    pub fn new() -> Self {
        Self
    }

    /// Number of labels in the codec's domain
    pub fn len(&self) -> usize {
        ClauseLabel::ALL.len()
    }

    /// Whether the codec's domain is empty (it never is)
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encode a label name to its integer id
    pub fn encode(&self, name: &str) -> Result<u32, LabelCodecError> {
        ClauseLabel::ALL
            .iter()
            .find(|label| label.name() == name)
            .map(|label| label.id())
            .ok_or_else(|| LabelCodecError::UnknownName(name.to_string()))
    }

    /// Decode an integer id to its label name
    pub fn decode(&self, id: u32) -> Result<&'static str, LabelCodecError> {
        ClauseLabel::from_id(id)
            .map(ClauseLabel::name)
            .ok_or(LabelCodecError::UnknownId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_round_trips_every_label() {
        let codec = LabelCodec::new();
        for label in ClauseLabel::ALL {
            let id = codec.encode(label.name()).unwrap();
            assert_eq!(id, label.id());
            assert_eq!(codec.decode(id).unwrap(), label.name());
        }
    }

    #[test]
    fn ids_are_dense_and_injective() {
        for (position, label) in ClauseLabel::ALL.iter().enumerate() {
            assert_eq!(label.id() as usize, position);
        }
        assert_eq!(ClauseLabel::ALL.len(), 47);
    }

    #[test]
    fn names_are_in_encoder_order() {
        // The training-time label encoder sorted names by code point
        let names: Vec<&str> = ClauseLabel::ALL.iter().map(|l| l.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_name_and_id_are_errors() {
        let codec = LabelCodec::new();
        assert_eq!(
            codec.encode("Not A Real Label"),
            Err(LabelCodecError::UnknownName("Not A Real Label".to_string()))
        );
        assert_eq!(codec.decode(47), Err(LabelCodecError::UnknownId(47)));
        assert_eq!(codec.decode(u32::MAX), Err(LabelCodecError::UnknownId(u32::MAX)));
    }
}
