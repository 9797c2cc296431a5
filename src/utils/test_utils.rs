use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// Header shared by the SV fixtures below; declares everything the callers
/// emit so rust-htslib can type each tag.
pub const SV_HEADER: &str = "##fileformat=VCFv4.2
##contig=<ID=chr1,length=248956422>
##contig=<ID=chr2,length=242193529>
##FILTER=<ID=LowQual,Description=\"Low quality\">
##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">
##INFO=<ID=SVLEN,Number=1,Type=Integer,Description=\"Length of structural variant\">
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End position\">
##INFO=<ID=IMPRECISE,Number=0,Type=Flag,Description=\"Imprecise call\">
##INFO=<ID=PRECISE,Number=0,Type=Flag,Description=\"Precise call\">
##INFO=<ID=CHR2,Number=1,Type=String,Description=\"Second chromosome\">
##INFO=<ID=MATEID,Number=.,Type=String,Description=\"Mate breakend\">
##INFO=<ID=HOMLEN,Number=1,Type=Integer,Description=\"Homology length\">
##INFO=<ID=HOMSEQ,Number=1,Type=String,Description=\"Homology sequence\">
##INFO=<ID=CALLER,Number=1,Type=String,Description=\"Caller\">
##INFO=<ID=EUK_CALLER,Number=1,Type=String,Description=\"Caller\">
##INFO=<ID=CIPOS,Number=2,Type=Integer,Description=\"CI around POS\">
##INFO=<ID=CIEND,Number=2,Type=Integer,Description=\"CI around END\">
##INFO=<ID=CIPOS_STD,Number=1,Type=Float,Description=\"Sniffles POS std\">
##INFO=<ID=CIEND_STD,Number=1,Type=Float,Description=\"Sniffles END std\">
##INFO=<ID=CIPOS95,Number=1,Type=Integer,Description=\"Dysgu POS CI width\">
##INFO=<ID=CIEND95,Number=1,Type=Integer,Description=\"Dysgu END CI width\">
##INFO=<ID=SUPP_VEC,Number=1,Type=String,Description=\"Support vector\">
##INFO=<ID=STRANDS,Number=1,Type=String,Description=\"Strands\">
##INFO=<ID=SVMETHOD,Number=1,Type=String,Description=\"Merge method\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=ID,Number=1,Type=String,Description=\"Original ID\">
##FORMAT=<ID=DR,Number=1,Type=Integer,Description=\"Reference reads\">
##FORMAT=<ID=AD,Number=R,Type=Integer,Description=\"Allelic depths\">
##FORMAT=<ID=QV,Number=1,Type=Float,Description=\"Quality\">
";

pub fn make_temp_vcf(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// `SV_HEADER` plus the sample line and `records`, one per line.
pub fn sv_vcf(samples: &[&str], records: &[&str]) -> String {
    let mut vcf = SV_HEADER.to_string();
    vcf.push_str("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO");
    if !samples.is_empty() {
        vcf.push_str("\tFORMAT\t");
        vcf.push_str(&samples.join("\t"));
    }
    vcf.push('\n');
    for record in records {
        vcf.push_str(record);
        vcf.push('\n');
    }
    vcf
}

/// Data lines of a plain-text VCF, in file order.
pub fn data_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn header_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| line.starts_with("##"))
        .map(str::to_string)
        .collect()
}
